//! CSV list of differing cells

use std::borrow::Cow;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::diff::DiffReport;

#[derive(Serialize)]
struct CsvRecord<'a> {
    #[serde(rename = "Row")]
    row: usize,
    #[serde(rename = "Column")]
    column: &'a str,
    #[serde(rename = "File1_Value")]
    file1_value: Cow<'a, str>,
    #[serde(rename = "File2_Value")]
    file2_value: Cow<'a, str>,
}

/// Serialize the report's records; `None` when there is nothing to list
pub fn write_records(report: &DiffReport) -> Result<Option<Vec<u8>>> {
    if !report.has_changes() {
        return Ok(None);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in &report.records {
        writer.serialize(CsvRecord {
            row: record.row,
            column: &record.column,
            file1_value: record.left_value.display(),
            file2_value: record.right_value.display(),
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV output")?;
    Ok(Some(bytes))
}
