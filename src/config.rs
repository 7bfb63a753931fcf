//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::charts::comparison::DEFAULT_REFERENCE_NAME;
use crate::dashboard::DashboardSettings;
use crate::data::DEFAULT_AGGREGATE_MARKER;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset location
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: String,
}

fn default_data_path() -> String {
    "romania_remote_work_prepared_data.csv".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl DataConfig {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which rows the dashboard features
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_highlight_country")]
    pub highlight_country: String,

    #[serde(default = "default_aggregate_marker")]
    pub aggregate_marker: String,

    #[serde(default = "default_reference_name")]
    pub reference_name: String,
}

fn default_highlight_country() -> String {
    "Romania".to_string()
}

fn default_aggregate_marker() -> String {
    DEFAULT_AGGREGATE_MARKER.to_string()
}

fn default_reference_name() -> String {
    DEFAULT_REFERENCE_NAME.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            highlight_country: default_highlight_country(),
            aggregate_marker: default_aggregate_marker(),
            reference_name: default_reference_name(),
        }
    }
}

impl DashboardConfig {
    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            highlight_country: self.highlight_country.clone(),
            aggregate_marker: self.aggregate_marker.clone(),
            reference_name: self.reference_name.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("telework").join("config.toml")),
            Some(PathBuf::from("/etc/telework/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Data overrides
        if let Some(path) = var("TELEWORK_DATA_PATH") {
            self.data.path = path;
        }

        // API overrides
        if let Some(host) = var("TELEWORK_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("TELEWORK_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid TELEWORK_API_PORT: {}", port),
            }
        }

        // Dashboard overrides
        if let Some(country) = var("TELEWORK_HIGHLIGHT_COUNTRY") {
            self.dashboard.highlight_country = country;
        }
        if let Some(name) = var("TELEWORK_REFERENCE_NAME") {
            self.dashboard.reference_name = name;
        }

        // Logging overrides
        if let Some(level) = var("TELEWORK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("TELEWORK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Telework Dashboard Configuration
#
# Environment variables override these settings:
# - TELEWORK_DATA_PATH
# - TELEWORK_API_HOST
# - TELEWORK_API_PORT
# - TELEWORK_HIGHLIGHT_COUNTRY
# - TELEWORK_REFERENCE_NAME
# - TELEWORK_LOG_LEVEL
# - TELEWORK_LOG_FORMAT

[data]
# Prepared CSV with one row per country plus the EU-27 aggregate
path = "romania_remote_work_prepared_data.csv"

[api]
# Server host
host = "0.0.0.0"

# Server port
port = 8501

[dashboard]
# Country featured in the key metrics and highlighted on the chart
highlight_country = "Romania"

# Substring identifying the aggregate (reference) row
aggregate_marker = "European Union"

# Short name for the aggregate in labels ("EU" gives "EU Average")
reference_name = "EU"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
