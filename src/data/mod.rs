//! Dataset
//!
//! - **types**: `Row`, `Table`, `Column`, `LoadReport`
//! - **country_codes**: static country name → map identifier lookup
//! - **loader**: CSV parsing and `iso_alpha` annotation
//! - **cache**: path + mtime keyed memoization of loaded tables
//! - **partition**: per-country rows vs. the aggregate row
//! - **error**: error types
//!
//! ```text
//! CSV file → loader → Table (Arc, cached) → Partition → charts / metrics
//! ```

pub mod cache;
pub mod country_codes;
pub mod error;
pub mod loader;
pub mod partition;
pub mod types;

pub use cache::{CacheStats, DataCache};
pub use error::{DataError, DataResult};
pub use loader::{load_table, read_table, read_table_str};
pub use partition::{Partition, DEFAULT_AGGREGATE_MARKER};
pub use types::{Column, LoadReport, Row, Table, ISO_ALPHA_COLUMN, REQUIRED_COLUMNS};
