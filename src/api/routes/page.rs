//! Page Route
//!
//! - GET / - Rendered dashboard (`?sort=&map_metric=`)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;

use crate::api::dto::SelectionParams;
use crate::api::state::AppState;
use crate::dashboard::{render_page, render_unavailable, Dashboard};

/// GET /
///
/// Renders the whole dashboard for the requested selections. When the dataset
/// cannot be loaded the page carries a single warning instead.
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> (StatusCode, Html<String>) {
    match state.table() {
        Ok(table) => {
            let selection = params.selection();
            tracing::debug!(
                sort = %selection.sort,
                map_metric = %selection.map_metric,
                "Rendering dashboard"
            );
            let dashboard = Dashboard::build(&table, selection, &state.settings);
            (StatusCode::OK, Html(render_page(&dashboard)))
        }
        Err(e) => {
            tracing::error!(
                path = %state.data_path.display(),
                error = %e,
                "Dataset unavailable"
            );
            (StatusCode::SERVICE_UNAVAILABLE, Html(render_unavailable(&e)))
        }
    }
}
