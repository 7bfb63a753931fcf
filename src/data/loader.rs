//! CSV Loader
//!
//! Reads the prepared statistics file into a [`Table`], annotating every row
//! with its map identifier. A cell that does not parse as a number is read
//! as missing and reported, so the country stays in every view. Records the
//! CSV reader itself rejects are skipped; missing columns are reported but do
//! not stop the load.

use chrono::Utc;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::country_codes;
use super::error::{DataError, DataResult};
use super::types::{Column, LoadReport, Row, Table, ISO_ALPHA_COLUMN, REQUIRED_COLUMNS};

/// Cap on per-line error messages kept in a report
const MAX_REPORTED_ERRORS: usize = 100;

const COUNTRY_COLUMN: &str = "Country";
const TREND_COLUMN: &str = "Remote_Work_Trend";

/// Load a table from a CSV file on disk
pub fn load_table(path: &Path) -> DataResult<Table> {
    let file = File::open(path).map_err(|e| DataError::from_io(path, e))?;

    let mut table = read_table(file)?;
    table.source = path.to_path_buf();

    tracing::info!(
        path = %path.display(),
        rows = table.report.rows_read,
        failed = table.report.rows_failed,
        "Loaded dataset"
    );

    Ok(table)
}

/// Load a table from an in-memory CSV string (useful for testing)
pub fn read_table_str(csv_data: &str) -> DataResult<Table> {
    read_table(csv_data.as_bytes())
}

/// Parse CSV from any reader
pub fn read_table<R: Read>(source: R) -> DataResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();

    let mut report = LoadReport {
        missing_columns: REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect(),
        ..Default::default()
    };

    if !report.missing_columns.is_empty() {
        tracing::warn!(
            missing = ?report.missing_columns,
            "Dataset is missing expected columns; affected values will be blank"
        );
    }

    let mut columns: Vec<String> = headers.iter().map(str::to_string).collect();
    let iso_index = match columns.iter().position(|c| c == ISO_ALPHA_COLUMN) {
        Some(idx) => idx,
        None => {
            columns.push(ISO_ALPHA_COLUMN.to_string());
            columns.len() - 1
        }
    };

    let position = |name: &str| headers.iter().position(|h| h == name);
    let country_index = position(COUNTRY_COLUMN);
    let trend_index = position(TREND_COLUMN);
    let numeric: Vec<(Column, usize)> = Column::all()
        .iter()
        .filter_map(|column| position(column.name()).map(|idx| (*column, idx)))
        .collect();

    let mut rows = Vec::new();
    let mut records = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        // Header occupies line 1
        let actual_line = line_num + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                report.errors.push(format!("Line {}: {}", actual_line, e));
                report.rows_failed += 1;
                continue;
            }
        };

        let text = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|cell| !cell.is_empty())
                .map(str::to_string)
        };

        let mut row = Row::new(text(country_index).unwrap_or_default());
        row.remote_work_trend = text(trend_index);

        for (column, idx) in &numeric {
            let raw = match record.get(*idx) {
                Some(raw) if !raw.is_empty() => raw,
                _ => continue,
            };
            match raw.parse::<f64>() {
                Ok(value) => row.set_value(*column, Some(value)),
                Err(_) => {
                    tracing::warn!(
                        line = actual_line,
                        country = %row.country,
                        column = %column,
                        value = %raw,
                        "Value is not a number; treating as missing"
                    );
                    report.errors.push(format!(
                        "Line {}: invalid number '{}' in {}",
                        actual_line, raw, column
                    ));
                    report.invalid_values += 1;
                }
            }
        }

        row.iso_alpha = country_codes::iso_alpha(&row.country).map(str::to_string);
        if row.iso_alpha.is_none() {
            tracing::debug!(country = %row.country, "No map identifier for country");
        }

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(columns.len(), String::new());
        cells[iso_index] = row.iso_alpha.clone().unwrap_or_default();

        records.push(cells);
        rows.push(row);
        report.rows_read += 1;
    }

    if report.rows_failed > 0 {
        tracing::warn!(
            failed = report.rows_failed,
            first_error = report.errors.first().map(String::as_str).unwrap_or(""),
            "Skipped malformed records"
        );
    }

    if report.errors.len() > MAX_REPORTED_ERRORS {
        let total = report.errors.len();
        report.errors.truncate(MAX_REPORTED_ERRORS);
        report
            .errors
            .push(format!("... and {} more errors", total - MAX_REPORTED_ERRORS));
    }

    Ok(Table {
        source: Default::default(),
        columns,
        records,
        rows,
        report,
        loaded_at: Utc::now(),
    })
}
