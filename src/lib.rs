//! # Telework
//!
//! Remote Work in Europe - a dashboard comparing remote-work adoption between
//! 2022 and 2024 and internet access across European countries, with one
//! country highlighted against the EU-27 aggregate.
//!
//! ## Features
//!
//! - **Data loading**: CSV table with derived ISO alpha-3 codes, cached by modification time
//! - **Key metrics**: three-value panel for the highlighted country
//! - **Comparison chart**: 2022 vs 2024 dumbbell with internet access overlay
//! - **Choropleth map**: internet access level or change over Europe
//! - **Explorer**: the raw table, as loaded
//!
//! ## Modules
//!
//! - [`data`]: Loading, country codes, aggregate partitioning and caching
//! - [`charts`]: Plotly figure specifications
//! - [`dashboard`]: Per-render assembly and HTML page
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use telework::dashboard::{render_page, Dashboard, DashboardSettings, Selection};
//! use telework::data::load_table;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = load_table(Path::new("romania_remote_work_prepared_data.csv"))?;
//!     let dashboard = Dashboard::build(&table, Selection::default(), &DashboardSettings::default());
//!
//!     std::fs::write("dashboard.html", render_page(&dashboard))?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod logging;

// Re-export top-level types for convenience
pub use data::{
    load_table, CacheStats, Column, DataCache, DataError, DataResult, LoadReport, Partition, Row,
    Table,
};

pub use charts::{ChoroplethMap, ComparisonChart, Figure, MapMetric, SortOrder};

pub use dashboard::{
    render_page, render_unavailable, Dashboard, DashboardSettings, ExplorerView, KeyMetrics,
    Selection,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
