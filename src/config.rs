//! Configuration handling for sheetdiff

use std::path::PathBuf;

/// Default fill used to mark differing cells (yellow)
pub const DEFAULT_HIGHLIGHT_COLOR: u32 = 0xFFFF00;

/// Default number of rows shown in each file preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Output format for the rendered report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Parse a `RRGGBB` hex color, with or without a leading `#`
pub fn parse_hex_color(s: &str) -> Result<u32, String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("Expected a RRGGBB color, got: {}", s));
    }
    u32::from_str_radix(hex, 16).map_err(|_| format!("Invalid hex color: {}", s))
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the first file (File1)
    pub left_file: PathBuf,
    /// Path to the second file (File2)
    pub right_file: PathBuf,
    /// For Excel files: which sheet to compare
    pub sheet_name: Option<String>,
    /// Output format
    pub output_format: OutputFormat,
    /// Where to write the exported artifacts, `None` disables export
    pub output_dir: Option<PathBuf>,
    /// Rows shown in each preview
    pub preview_rows: usize,
    /// RGB fill for differing cells in the highlighted workbook
    pub highlight_color: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            left_file: PathBuf::new(),
            right_file: PathBuf::new(),
            sheet_name: None,
            output_format: OutputFormat::default(),
            output_dir: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
        }
    }
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(left_file: PathBuf, right_file: PathBuf) -> Self {
        Self {
            left_file,
            right_file,
            ..Default::default()
        }
    }

    /// Set Excel sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = Some(name);
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the export directory
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Set the number of preview rows
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Set the highlight fill color
    pub fn with_highlight_color(mut self, color: u32) -> Self {
        self.highlight_color = color;
        self
    }
}
