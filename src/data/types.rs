//! Core data types for the dashboard dataset
//!
//! - `Row`: one country's remote-work and internet-access figures
//! - `Column`: the numeric columns, addressable by name
//! - `Table`: the loaded file, immutable after load
//! - `LoadReport`: what the loader skipped or could not find

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{DataError, DataResult};

/// Name of the column the loader derives from `Country`
pub const ISO_ALPHA_COLUMN: &str = "iso_alpha";

/// Columns the dashboard reads from the source file
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Country",
    "Remote_Work_2022",
    "Remote_Work_2024",
    "Remote_Work_Change",
    "Remote_Work_Trend",
    "Internet_Access_2024",
    "Internet_Access_Change",
];

/// One country-level record
///
/// Numeric fields are optional: an empty cell in the source is a missing
/// value, not a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "Remote_Work_2022", default)]
    pub remote_work_2022: Option<f64>,

    #[serde(rename = "Remote_Work_2024", default)]
    pub remote_work_2024: Option<f64>,

    #[serde(rename = "Remote_Work_Change", default)]
    pub remote_work_change: Option<f64>,

    #[serde(rename = "Remote_Work_Trend", default)]
    pub remote_work_trend: Option<String>,

    #[serde(rename = "Internet_Access_2024", default)]
    pub internet_access_2024: Option<f64>,

    #[serde(rename = "Internet_Access_Change", default)]
    pub internet_access_change: Option<f64>,

    /// Map identifier, filled in by the loader
    #[serde(default)]
    pub iso_alpha: Option<String>,
}

impl Row {
    /// Create a row with only a country name
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            remote_work_2022: None,
            remote_work_2024: None,
            remote_work_change: None,
            remote_work_trend: None,
            internet_access_2024: None,
            internet_access_change: None,
            iso_alpha: None,
        }
    }

    /// Builder method: set remote-work values for both years
    pub fn remote_work(mut self, y2022: Option<f64>, y2024: Option<f64>) -> Self {
        self.remote_work_2022 = y2022;
        self.remote_work_2024 = y2024;
        self.remote_work_change = match (y2022, y2024) {
            (Some(a), Some(b)) => Some(b - a),
            _ => None,
        };
        self
    }

    /// Builder method: override the remote-work change
    pub fn change(mut self, change: Option<f64>) -> Self {
        self.remote_work_change = change;
        self
    }

    /// Builder method: set internet-access values
    pub fn internet(mut self, y2024: Option<f64>, change: Option<f64>) -> Self {
        self.internet_access_2024 = y2024;
        self.internet_access_change = change;
        self
    }

    /// Builder method: set the trend label
    pub fn trend(mut self, trend: impl Into<String>) -> Self {
        self.remote_work_trend = Some(trend.into());
        self
    }

    /// Builder method: set the map identifier
    pub fn iso(mut self, code: impl Into<String>) -> Self {
        self.iso_alpha = Some(code.into());
        self
    }

    /// Read a numeric column
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::RemoteWork2022 => self.remote_work_2022,
            Column::RemoteWork2024 => self.remote_work_2024,
            Column::RemoteWorkChange => self.remote_work_change,
            Column::InternetAccess2024 => self.internet_access_2024,
            Column::InternetAccessChange => self.internet_access_change,
        }
    }

    /// Set a numeric column
    pub fn set_value(&mut self, column: Column, value: Option<f64>) {
        match column {
            Column::RemoteWork2022 => self.remote_work_2022 = value,
            Column::RemoteWork2024 => self.remote_work_2024 = value,
            Column::RemoteWorkChange => self.remote_work_change = value,
            Column::InternetAccess2024 => self.internet_access_2024 = value,
            Column::InternetAccessChange => self.internet_access_change = value,
        }
    }

    /// Read a numeric column that a computation cannot do without
    pub fn require(&self, column: Column) -> DataResult<f64> {
        self.value(column).ok_or_else(|| DataError::MissingValue {
            country: self.country.clone(),
            field: column.name(),
        })
    }
}

/// Numeric columns of a `Row`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    RemoteWork2022,
    RemoteWork2024,
    RemoteWorkChange,
    InternetAccess2024,
    InternetAccessChange,
}

impl Column {
    pub fn all() -> &'static [Column] {
        &[
            Column::RemoteWork2022,
            Column::RemoteWork2024,
            Column::RemoteWorkChange,
            Column::InternetAccess2024,
            Column::InternetAccessChange,
        ]
    }

    /// Header name in the source file
    pub fn name(&self) -> &'static str {
        match self {
            Column::RemoteWork2022 => "Remote_Work_2022",
            Column::RemoteWork2024 => "Remote_Work_2024",
            Column::RemoteWorkChange => "Remote_Work_Change",
            Column::InternetAccess2024 => "Internet_Access_2024",
            Column::InternetAccessChange => "Internet_Access_Change",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of a load: counts and anything that did not parse
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_failed: usize,
    /// Cells that held text where a number was expected; read as missing
    pub invalid_values: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_columns: Vec<String>,
}

impl LoadReport {
    /// True when every record and value parsed and every expected column was present
    pub fn is_clean(&self) -> bool {
        self.rows_failed == 0 && self.invalid_values == 0 && self.missing_columns.is_empty()
    }
}

/// The loaded dataset
///
/// `rows` holds the typed records; `columns` and `records` keep every record
/// read from the file as text (plus the derived `iso_alpha` column) for the
/// raw-data explorer.
#[derive(Debug, Clone)]
pub struct Table {
    pub source: PathBuf,
    pub columns: Vec<String>,
    pub records: Vec<Vec<String>>,
    pub rows: Vec<Row>,
    pub report: LoadReport,
    pub loaded_at: DateTime<Utc>,
}

impl Table {
    /// Build a table directly from typed rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.push(ISO_ALPHA_COLUMN.to_string());

        let records = rows
            .iter()
            .map(|row| {
                vec![
                    row.country.clone(),
                    format_cell(row.remote_work_2022),
                    format_cell(row.remote_work_2024),
                    format_cell(row.remote_work_change),
                    row.remote_work_trend.clone().unwrap_or_default(),
                    format_cell(row.internet_access_2024),
                    format_cell(row.internet_access_change),
                    row.iso_alpha.clone().unwrap_or_default(),
                ]
            })
            .collect();

        Self {
            source: PathBuf::new(),
            columns,
            records,
            report: LoadReport {
                rows_read: rows.len(),
                ..Default::default()
            },
            rows,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
