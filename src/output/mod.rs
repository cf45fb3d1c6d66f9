//! Output formatting for comparison reports

mod json;
mod terminal;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::config::OutputFormat;
use crate::diff::DiffReport;
use crate::model::Table;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a report to a writer
    ///
    /// `left` and `right` are the normalized inputs before alignment, used
    /// for previews.
    fn render(
        &self,
        report: &DiffReport,
        left: &Table,
        right: &Table,
        left_path: &Path,
        right_path: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, preview_rows: usize) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new(preview_rows)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a report to stdout
pub fn render_to_stdout(
    report: &DiffReport,
    left: &Table,
    right: &Table,
    left_path: &Path,
    right_path: &Path,
    format: OutputFormat,
    preview_rows: usize,
) -> Result<()> {
    let formatter = OutputFactory::create(format, preview_rows);
    let color_choice = match format {
        OutputFormat::Terminal if std::io::stdout().is_terminal() => ColorChoice::Auto,
        _ => ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(color_choice);
    formatter.render(report, left, right, left_path, right_path, &mut stdout)
}
