//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dataset loads)
//! - GET /health - Full health status
//! - POST /api/v1/cache/invalidate - Drop the cached table

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{HealthResponse, InvalidateResponse};
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the dataset can be loaded.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.table() {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with dataset details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, data, rows, loaded_at) = match state.table() {
        Ok(table) if table.report.is_clean() => (
            "healthy",
            "ok".to_string(),
            Some(table.len()),
            Some(table.loaded_at.to_rfc3339()),
        ),
        Ok(table) => (
            "degraded",
            format!(
                "{} malformed record(s), {} invalid value(s), {} missing column(s)",
                table.report.rows_failed,
                table.report.invalid_values,
                table.report.missing_columns.len()
            ),
            Some(table.len()),
            Some(table.loaded_at.to_rfc3339()),
        ),
        Err(e) => ("unhealthy", e.to_string(), None, None),
    };

    Json(HealthResponse {
        status: status.to_string(),
        data,
        rows,
        loaded_at,
        cache: state.cache.stats(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/v1/cache/invalidate
///
/// Forces the next request to re-read the dataset.
pub async fn invalidate_cache(State(state): State<Arc<AppState>>) -> Json<InvalidateResponse> {
    let invalidated = state.cache.invalidate(&state.data_path);
    tracing::info!(invalidated, path = %state.data_path.display(), "Cache invalidation requested");

    Json(InvalidateResponse {
        invalidated,
        cache: state.cache.stats(),
    })
}
