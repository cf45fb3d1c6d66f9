//! Colored terminal output

use std::path::Path;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::config::DEFAULT_PREVIEW_ROWS;
use crate::diff::DiffReport;
use crate::export::{CSV_FILE_NAME, SUMMARY_SHEET, WORKBOOK_FILE_NAME};
use crate::model::{Row, Table};

use super::OutputFormatter;

/// Terminal output with previews, the difference list and a summary line
pub struct TerminalOutput {
    preview_rows: usize,
}

impl TerminalOutput {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    fn write_heading(&self, writer: &mut dyn WriteColor, title: &str) -> Result<()> {
        writer.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(writer, "{}", title)?;
        writer.reset()?;
        Ok(())
    }

    fn write_preview(
        &self,
        writer: &mut dyn WriteColor,
        title: &str,
        path: &Path,
        table: &Table,
    ) -> Result<()> {
        self.write_heading(writer, &format!("{} ({})", title, path.display()))?;

        let rows = table.head(self.preview_rows);
        writeln!(writer, "{}", build_table(table, rows))?;
        if table.row_count() > rows.len() {
            writeln!(writer, "... {} more rows", table.row_count() - rows.len())?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_differences(&self, writer: &mut dyn WriteColor, report: &DiffReport) -> Result<()> {
        self.write_heading(writer, "Text Summary of Differences")?;

        if !report.has_changes() {
            writeln!(writer, "No differences found.")?;
            writeln!(writer)?;
            return Ok(());
        }

        let mut builder = Builder::default();
        builder.push_record(["Row", "Column", "File1_Value", "File2_Value"].map(String::from));
        for record in &report.records {
            builder.push_record([
                record.row.to_string(),
                record.column.clone(),
                record.left_value.display().into_owned(),
                record.right_value.display().into_owned(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(writer, "{}", table)?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_summary(&self, writer: &mut dyn WriteColor, report: &DiffReport) -> Result<()> {
        let color = if report.has_changes() {
            Color::Yellow
        } else {
            Color::Green
        };
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        writeln!(
            writer,
            "Comparison completed — {} total differences found across {} columns.",
            report.total_changes, report.stats.columns_compared
        )?;
        writer.reset()?;

        writeln!(writer, "Highlighted cells = cells that differ ({})", WORKBOOK_FILE_NAME)?;
        writeln!(writer, "'{}' sheet = overall stats", SUMMARY_SHEET)?;
        if report.has_changes() {
            writeln!(writer, "{} = full difference list", CSV_FILE_NAME)?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_ROWS)
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(
        &self,
        report: &DiffReport,
        left: &Table,
        right: &Table,
        left_path: &Path,
        right_path: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        self.write_preview(writer, "File 1 Preview", left_path, left)?;
        self.write_preview(writer, "File 2 Preview", right_path, right)?;
        self.write_differences(writer, report)?;
        self.write_summary(writer, report)?;
        Ok(())
    }
}

/// Build a formatted table from a header and rows
fn build_table(table: &Table, rows: &[Row]) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.column_names().map(str::to_string));
    for row in rows {
        builder.push_record(row.cells.iter().map(|c| c.display().into_owned()));
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    use crate::diff::compute_diff;

    fn render(left: Table, right: Table, preview_rows: usize) -> String {
        let report = compute_diff(left.clone(), right.clone()).unwrap();
        let mut buffer = Buffer::no_color();
        TerminalOutput::new(preview_rows)
            .render(
                &report,
                &left,
                &right,
                Path::new("a.csv"),
                Path::new("b.csv"),
                &mut buffer,
            )
            .unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_render_with_differences() {
        let a = Table::from_rows(["Name", "Age"], [["Tom", "30"], ["Ana", "25"]]);
        let b = Table::from_rows(["Name", "Age"], [["Tom", "31"], ["Ana", "25"]]);
        let out = render(a, b, 5);

        assert!(out.contains("File 1 Preview (a.csv)"));
        assert!(out.contains("File 2 Preview (b.csv)"));
        assert!(out.contains("File1_Value"));
        assert!(out.contains("1 total differences found across 2 columns"));
        assert!(out.contains(CSV_FILE_NAME));
    }

    #[test]
    fn test_render_without_differences() {
        let a = Table::from_rows(["Name"], [["Tom"]]);
        let out = render(a.clone(), a, 5);

        assert!(out.contains("No differences found."));
        assert!(out.contains("0 total differences"));
        assert!(!out.contains(CSV_FILE_NAME));
    }

    #[test]
    fn test_preview_is_truncated() {
        let a = Table::from_rows(["n"], [["1"], ["2"], ["3"]]);
        let out = render(a.clone(), a, 2);

        assert!(out.contains("... 1 more rows"));
    }
}
