//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::charts::{MetricScale, SortOrder};
use crate::dashboard::Selection;
use crate::data::CacheStats;

/// Selection query parameters
///
/// Kept as raw strings so an unknown value falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub map_metric: Option<String>,
}

impl SelectionParams {
    pub fn selection(&self) -> Selection {
        Selection::from_params(self.sort.as_deref(), self.map_metric.as_deref())
    }
}

/// Comparison chart response
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub sort: SortOrder,
    pub reference: f64,
    pub figure: crate::charts::Figure,
}

/// Map response
#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub scale: &'static MetricScale,
    pub figure: crate::charts::Figure,
}

/// Cache invalidation response
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: bool,
    pub cache: CacheStats,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
    pub cache: CacheStats,
    pub uptime_seconds: u64,
    pub version: String,
}
