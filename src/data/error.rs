//! Data layer error types
//!
//! Load failures (the file is absent or unreadable) are kept apart from the
//! data-quality failures raised by lookups over a loaded table.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or querying the dataset
#[derive(Error, Debug)]
pub enum DataError {
    /// Source file does not exist
    #[error("The file '{}' was not found", path.display())]
    NotFound { path: PathBuf },

    /// Source file exists but could not be read
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV header could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No row matched the aggregate marker
    #[error("No aggregate row matching '{marker}' in dataset")]
    AggregateMissing { marker: String },

    /// Requested country is not in the per-country rows
    #[error("Country not found in dataset: {0}")]
    CountryNotFound(String),

    /// A value needed for a computation is empty in the source
    #[error("Missing value for {field} in row '{country}'")]
    MissingValue {
        country: String,
        field: &'static str,
    },
}

impl DataError {
    /// Classify an I/O error raised while opening `path`
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// True when the table itself could not be produced.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DataError::NotFound { .. } | DataError::Io { .. } | DataError::Csv(_)
        )
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
