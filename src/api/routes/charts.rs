//! Chart Routes
//!
//! Figure specifications as JSON, for clients that draw their own page.
//!
//! - GET /api/v1/charts/comparison - Dumbbell chart (`?sort=`)
//! - GET /api/v1/charts/map - Choropleth (`?map_metric=`)

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ComparisonResponse, MapResponse, SelectionParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::charts::comparison::reference_value;
use crate::charts::ChoroplethMap;
use crate::dashboard::comparison_figure;
use crate::data::Partition;

/// GET /api/v1/charts/comparison
pub async fn comparison_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> ApiResult<Json<ComparisonResponse>> {
    let table = state.table()?;
    let partition = Partition::split(&table, &state.settings.aggregate_marker);
    let sort = params.selection().sort;

    let figure = comparison_figure(&partition, sort, &state.settings)?;
    let reference = reference_value(&figure)
        .ok_or_else(|| ApiError::Internal("Comparison chart has no reference line".to_string()))?;

    Ok(Json(ComparisonResponse {
        sort,
        reference,
        figure,
    }))
}

/// GET /api/v1/charts/map
pub async fn map_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> ApiResult<Json<MapResponse>> {
    let table = state.table()?;
    let partition = Partition::split(&table, &state.settings.aggregate_marker);
    let metric = params.selection().map_metric;

    let figure = ChoroplethMap::new(&partition.countries)
        .with_metric(metric)
        .build();

    Ok(Json(MapResponse {
        scale: metric.scale(),
        figure,
    }))
}
