//! sheetdiff - Cell-by-cell diff for spreadsheets

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use sheetdiff::config::{parse_hex_color, Config, OutputFormat, DEFAULT_PREVIEW_ROWS};
use sheetdiff::diff::{normalize_columns, TableDiffer};
use sheetdiff::export::ReportExporter;
use sheetdiff::output::render_to_stdout;
use sheetdiff::parser::ParserFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Compare two spreadsheets cell by cell and export a highlighted report
#[derive(Parser, Debug)]
#[command(name = "sheetdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First file to compare (File1)
    file1: PathBuf,

    /// Second file to compare (File2)
    file2: PathBuf,

    /// For Excel files: which sheet to compare
    #[arg(short, long)]
    sheet: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Directory for comparison_highlighted.xlsx and comparison_summary.csv
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Do not write any report files
    #[arg(long)]
    no_export: bool,

    /// Rows shown in each file preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview_rows: usize,

    /// Fill color for differing cells (RRGGBB)
    #[arg(long, default_value = "FFFF00", value_parser = parse_hex_color)]
    highlight_color: u32,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(has_changes) => {
            if has_changes {
                ExitCode::from(1) // Differences found
            } else {
                ExitCode::SUCCESS // No differences
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut config = Config::new(cli.file1, cli.file2)
        .with_output_format(cli.format.into())
        .with_preview_rows(cli.preview_rows)
        .with_highlight_color(cli.highlight_color);
    if let Some(sheet) = cli.sheet {
        config = config.with_sheet_name(sheet);
    }
    if !cli.no_export {
        config = config.with_output_dir(cli.output_dir);
    }

    // Parse files
    let factory = ParserFactory::new();

    let left = factory
        .parse(&config.left_file, &config)
        .with_context(|| format!("Failed to parse first file: {}", config.left_file.display()))?;
    let right = factory
        .parse(&config.right_file, &config)
        .with_context(|| format!("Failed to parse second file: {}", config.right_file.display()))?;

    let left = normalize_columns(left)
        .with_context(|| format!("Invalid headers in {}", config.left_file.display()))?;
    let right = normalize_columns(right)
        .with_context(|| format!("Invalid headers in {}", config.right_file.display()))?;

    let report = TableDiffer::compare_normalized(&left, &right);

    render_to_stdout(
        &report,
        &left,
        &right,
        &config.left_file,
        &config.right_file,
        config.output_format,
        config.preview_rows,
    )?;

    if let Some(ref dir) = config.output_dir {
        let artifacts = ReportExporter::new()
            .with_highlight_color(config.highlight_color)
            .write_to_dir(&report, dir)?;

        eprintln!("Highlighted report: {}", artifacts.workbook.display());
        if let Some(csv) = artifacts.csv {
            eprintln!("Difference list: {}", csv.display());
        }
    }

    Ok(report.has_changes())
}
