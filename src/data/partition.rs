//! Dataset partitioning
//!
//! Splits a table into per-country rows and the supra-national aggregate row
//! that serves as the comparison baseline.

use super::error::{DataError, DataResult};
use super::types::{Column, Row, Table};

/// Substring identifying the EU-27 aggregate row
pub const DEFAULT_AGGREGATE_MARKER: &str = "European Union";

/// Per-country rows and the aggregate row
#[derive(Debug, Clone)]
pub struct Partition {
    /// Rows not matching the marker, in file order
    pub countries: Vec<Row>,
    /// First row matching the marker
    pub aggregate: Option<Row>,
    /// How many rows matched the marker
    pub aggregate_matches: usize,
    marker: String,
}

impl Partition {
    /// Split `table` on `marker`
    pub fn split(table: &Table, marker: &str) -> Self {
        Self::from_rows(&table.rows, marker)
    }

    /// Split a row slice on `marker`
    pub fn from_rows(rows: &[Row], marker: &str) -> Self {
        let mut countries = Vec::with_capacity(rows.len());
        let mut aggregate = None;
        let mut aggregate_matches = 0;

        for row in rows {
            if row.country.contains(marker) {
                aggregate_matches += 1;
                if aggregate.is_none() {
                    aggregate = Some(row.clone());
                }
            } else {
                countries.push(row.clone());
            }
        }

        match aggregate_matches {
            0 => tracing::warn!(marker = %marker, "No aggregate row in dataset"),
            1 => {}
            n => tracing::warn!(
                marker = %marker,
                matches = n,
                "Multiple aggregate rows in dataset, using the first"
            ),
        }

        Self {
            countries,
            aggregate,
            aggregate_matches,
            marker: marker.to_string(),
        }
    }

    /// The aggregate row, or `AggregateMissing`
    pub fn aggregate(&self) -> DataResult<&Row> {
        self.aggregate
            .as_ref()
            .ok_or_else(|| DataError::AggregateMissing {
                marker: self.marker.clone(),
            })
    }

    /// The aggregate's latest remote-work value: the reference line position
    pub fn aggregate_latest(&self) -> DataResult<f64> {
        self.aggregate()?.require(Column::RemoteWork2024)
    }

    /// Look up a per-country row by exact name
    pub fn country(&self, name: &str) -> DataResult<&Row> {
        self.countries
            .iter()
            .find(|row| row.country == name)
            .ok_or_else(|| DataError::CountryNotFound(name.to_string()))
    }
}
