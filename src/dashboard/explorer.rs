//! Data Explorer
//!
//! The loaded table exactly as read, for inspection. No sorting, filtering
//! or partitioning is applied.

use serde::Serialize;
use std::io::Write;

use crate::data::{LoadReport, Table};

#[derive(Debug, Clone, Serialize)]
pub struct ExplorerView {
    pub columns: Vec<String>,
    pub records: Vec<Vec<String>>,
    pub report: LoadReport,
}

impl ExplorerView {
    pub fn from_table(table: &Table) -> Self {
        Self {
            columns: table.columns.clone(),
            records: table.records.clone(),
            report: table.report.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the view back out as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for record in &self.records {
            out.write_record(record)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Plain-text table with padded columns
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for record in &self.records {
            for (idx, cell) in record.iter().enumerate() {
                if let Some(w) = widths.get_mut(idx) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let format_line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = format_line(&self.columns);
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        out.push('\n');
        for record in &self.records {
            out.push_str(&format_line(record));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_table_str;

    const SAMPLE: &str = "\
Country,Remote_Work_2022,Remote_Work_2024,Remote_Work_Change,Remote_Work_Trend,Internet_Access_2024,Internet_Access_Change
European Union - 27 countries (from 2020),20.5,22.0,1.5,Increase,93.0,1.2
Kosovo,,12.0,,Unknown,88.0,
Romania,8.00,9.50,1.50,Increase,91.0,2.0
";

    #[test]
    fn test_view_is_verbatim() {
        let table = read_table_str(SAMPLE).unwrap();
        let view = ExplorerView::from_table(&table);

        // File order, aggregate included, original text kept
        assert_eq!(view.len(), 3);
        assert_eq!(view.records[0][0], "European Union - 27 countries (from 2020)");
        assert_eq!(view.records[2][1], "8.00");
        assert_eq!(view.records[1][1], "");
        assert_eq!(view.columns.last().map(String::as_str), Some("iso_alpha"));
    }

    #[test]
    fn test_write_csv() {
        let table = read_table_str(SAMPLE).unwrap();
        let view = ExplorerView::from_table(&table);

        let mut buf = Vec::new();
        view.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert!(lines.next().unwrap().ends_with(",iso_alpha"));
        assert!(text.contains("Romania,8.00,9.50,1.50,Increase,91.0,2.0,ROU"));
    }

    #[test]
    fn test_to_text_aligns_columns() {
        let table = read_table_str("Country,Remote_Work_2024\nMalta,3\nNetherlands,40\n").unwrap();
        let text = ExplorerView::from_table(&table).to_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Country      Remote_Work_2024"));
        assert!(lines[1].starts_with("-----------  ----------------"));
        assert!(lines[2].starts_with("Malta        3"));
    }
}
