//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for sharing across async tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::dashboard::DashboardSettings;
use crate::data::{DataCache, DataResult, Table};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded-table cache
    pub cache: Arc<DataCache>,
    /// Dataset served by this instance
    pub data_path: PathBuf,
    /// Highlighted country and aggregate marker
    pub settings: Arc<DashboardSettings>,
    /// Server configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        data_path: impl Into<PathBuf>,
        settings: DashboardSettings,
        config: ApiConfig,
    ) -> Self {
        Self {
            cache: Arc::new(DataCache::new()),
            data_path: data_path.into(),
            settings: Arc::new(settings),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Current table, served from the cache when the file is unchanged
    pub fn table(&self) -> DataResult<Arc<Table>> {
        self.cache.get_or_load(&self.data_path)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
