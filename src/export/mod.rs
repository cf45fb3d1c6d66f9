//! Report artifacts: highlighted workbook and CSV difference list

mod csv;
mod xlsx;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::DEFAULT_HIGHLIGHT_COLOR;
use crate::diff::DiffReport;

pub use self::xlsx::{summary_lines, LEFT_SHEET, RIGHT_SHEET, SUMMARY_SHEET};

/// File name of the highlighted workbook
pub const WORKBOOK_FILE_NAME: &str = "comparison_highlighted.xlsx";

/// File name of the CSV difference list
pub const CSV_FILE_NAME: &str = "comparison_summary.csv";

/// Paths written by [`ReportExporter::write_to_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifacts {
    pub workbook: PathBuf,
    /// Absent when the report has no differences
    pub csv: Option<PathBuf>,
}

/// Produces the downloadable artifacts of a comparison
pub struct ReportExporter {
    highlight_color: u32,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter {
    pub fn new() -> Self {
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
        }
    }

    /// Use a different RGB fill for differing cells
    pub fn with_highlight_color(mut self, color: u32) -> Self {
        self.highlight_color = color;
        self
    }

    /// Render the File1/File2/Summary workbook as xlsx bytes
    pub fn workbook_bytes(&self, report: &DiffReport) -> Result<Vec<u8>> {
        let mut workbook = xlsx::build_workbook(report, self.highlight_color)?;
        workbook
            .save_to_buffer()
            .context("Failed to serialize highlighted workbook")
    }

    /// Render the difference list as CSV; `None` when there are no differences
    pub fn csv_bytes(&self, report: &DiffReport) -> Result<Option<Vec<u8>>> {
        self::csv::write_records(report)
    }

    /// Write both artifacts into `dir`
    pub fn write_to_dir(&self, report: &DiffReport, dir: &Path) -> Result<ExportArtifacts> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let workbook = dir.join(WORKBOOK_FILE_NAME);
        fs::write(&workbook, self.workbook_bytes(report)?)
            .with_context(|| format!("Failed to write {}", workbook.display()))?;
        log::info!("wrote {}", workbook.display());

        let csv = match self.csv_bytes(report)? {
            Some(bytes) => {
                let path = dir.join(CSV_FILE_NAME);
                fs::write(&path, bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("wrote {}", path.display());
                Some(path)
            }
            None => {
                log::info!("no differences, skipping {}", CSV_FILE_NAME);
                None
            }
        };

        Ok(ExportArtifacts { workbook, csv })
    }
}
