//! Export Routes
//!
//! The explorer table for download or inspection.
//!
//! - GET /api/v1/data - Full table (`?format=json|csv`)

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::ExplorerView;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

/// GET /api/v1/data
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let table = state.table()?;
    let view = ExplorerView::from_table(&table);

    let (content_type, body) = match params.format.to_lowercase().as_str() {
        "csv" => {
            let mut buf = Vec::new();
            view.write_csv(&mut buf)
                .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))?;
            ("text/csv", buf)
        }
        "json" => {
            let json = serde_json::to_vec_pretty(&view)
                .map_err(|e| ApiError::Internal(format!("JSON encoding failed: {}", e)))?;
            ("application/json", json)
        }
        other => {
            return Err(ApiError::Validation(format!(
                "Unsupported export format: {}",
                other
            )))
        }
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        Body::from(body),
    )
        .into_response())
}
