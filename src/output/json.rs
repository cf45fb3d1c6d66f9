//! JSON output format

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::diff::DiffReport;
use crate::model::{CellValue, Table};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file1: String,
    file2: String,
    total_changes: usize,
    columns_compared: usize,
    rows_file1: usize,
    rows_file2: usize,
    differences: Vec<JsonDifference<'a>>,
}

#[derive(Serialize)]
struct JsonDifference<'a> {
    row: usize,
    column: &'a str,
    file1_value: serde_json::Value,
    file2_value: serde_json::Value,
}

/// Empty cells render as `""`, matching the CSV export
fn cell_value_to_json(value: &CellValue) -> serde_json::Value {
    match value {
        CellValue::Empty => serde_json::Value::String(String::new()),
        CellValue::Bool(b) => serde_json::Value::Bool(*b),
        CellValue::Int(i) => serde_json::json!(*i),
        CellValue::Float(f) => serde_json::json!(*f),
        CellValue::String(s) => serde_json::Value::String(s.to_string()),
        CellValue::Date(d) => serde_json::Value::String(d.to_string()),
        CellValue::DateTime(dt) => serde_json::Value::String(dt.to_string()),
    }
}

impl OutputFormatter for JsonOutput {
    fn render(
        &self,
        report: &DiffReport,
        _left: &Table,
        _right: &Table,
        left_path: &Path,
        right_path: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        let output = JsonReport {
            file1: left_path.display().to_string(),
            file2: right_path.display().to_string(),
            total_changes: report.total_changes,
            columns_compared: report.stats.columns_compared,
            rows_file1: report.stats.left_row_count,
            rows_file2: report.stats.right_row_count,
            differences: report
                .records
                .iter()
                .map(|r| JsonDifference {
                    row: r.row,
                    column: &r.column,
                    file1_value: cell_value_to_json(&r.left_value),
                    file2_value: cell_value_to_json(&r.right_value),
                })
                .collect(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
