//! Metrics Routes
//!
//! - GET /api/v1/metrics - Key metrics for the highlighted country
//! - GET /api/v1/metrics/:country - Key metrics for any country in the dataset

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::KeyMetrics;
use crate::data::Partition;

/// GET /api/v1/metrics
pub async fn highlighted_metrics(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<KeyMetrics>> {
    let country = state.settings.highlight_country.clone();
    country_metrics_inner(&state, &country)
}

/// GET /api/v1/metrics/:country
pub async fn country_metrics(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> ApiResult<Json<KeyMetrics>> {
    country_metrics_inner(&state, &country)
}

fn country_metrics_inner(state: &AppState, country: &str) -> ApiResult<Json<KeyMetrics>> {
    let table = state.table()?;
    let partition = Partition::split(&table, &state.settings.aggregate_marker);
    let metrics = KeyMetrics::for_country(&partition, country, &state.settings.reference_name)?;
    Ok(Json(metrics))
}
