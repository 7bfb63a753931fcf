//! Telework Dashboard Server
//!
//! Run with: cargo run --bin telework -- --data romania_remote_work_prepared_data.csv
//!
//! # Configuration
//!
//! Settings come from `--config` (or the default search path), then
//! environment variables:
//! - `TELEWORK_DATA_PATH`: CSV to serve
//! - `TELEWORK_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TELEWORK_API_PORT`: Port to listen on (default: 8501)
//! - `TELEWORK_HIGHLIGHT_COUNTRY`: Featured country (default: Romania)
//! - `TELEWORK_REFERENCE_NAME`: Aggregate name in labels (default: EU)
//! - `TELEWORK_LOG_LEVEL`, `TELEWORK_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter, overrides the configured level

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use telework::api::{serve, AppState};
use telework::config::Config;

#[derive(Parser)]
#[command(name = "telework")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the Remote Work in Europe dashboard")]
struct Args {
    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file to serve, overrides the configured path
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Port to listen on, overrides the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(data) = args.data {
        config.data.path = data.to_string_lossy().into_owned();
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    telework::logging::init(&config.logging);

    tracing::info!("Starting Telework dashboard v{}", env!("CARGO_PKG_VERSION"));

    let data_path = config.data.path();
    let settings = config.dashboard.settings();
    tracing::info!(
        data = %data_path.display(),
        highlight = %settings.highlight_country,
        "Dashboard configured"
    );

    let state = AppState::new(data_path, settings, config.api.clone());

    // Warm the cache so a bad path shows up in the logs at startup
    match state.table() {
        Ok(table) => tracing::info!(rows = table.len(), "Dataset loaded"),
        Err(e) => tracing::warn!(error = %e, "Dataset not available yet, serving warning page"),
    }

    serve(state, &config.api).await?;

    tracing::info!("Telework dashboard stopped");
    Ok(())
}
