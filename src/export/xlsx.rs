//! Highlighted workbook export

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveTime, Timelike};
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatPattern, Workbook, Worksheet};
use rustc_hash::FxHashSet;

use crate::diff::DiffReport;
use crate::model::{CellValue, Table};

pub const LEFT_SHEET: &str = "File1";
pub const RIGHT_SHEET: &str = "File2";
pub const SUMMARY_SHEET: &str = "Summary";

const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Cell formats shared by both data sheets
struct CellFormats {
    highlight: Format,
    date: Format,
    datetime: Format,
    highlighted_date: Format,
    highlighted_datetime: Format,
}

impl CellFormats {
    fn new(highlight_color: u32) -> Self {
        let highlight = Format::new()
            .set_background_color(Color::RGB(highlight_color))
            .set_pattern(FormatPattern::Solid);
        Self {
            date: Format::new().set_num_format(DATE_NUM_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_NUM_FORMAT),
            highlighted_date: highlight.clone().set_num_format(DATE_NUM_FORMAT),
            highlighted_datetime: highlight.clone().set_num_format(DATETIME_NUM_FORMAT),
            highlight,
        }
    }

    fn for_value(&self, value: &CellValue, highlighted: bool) -> Option<&Format> {
        match (value, highlighted) {
            (CellValue::Date(_), false) => Some(&self.date),
            (CellValue::Date(_), true) => Some(&self.highlighted_date),
            (CellValue::DateTime(_), false) => Some(&self.datetime),
            (CellValue::DateTime(_), true) => Some(&self.highlighted_datetime),
            (_, true) => Some(&self.highlight),
            (_, false) => None,
        }
    }
}

/// Build the File1/File2/Summary workbook for a report
pub fn build_workbook(report: &DiffReport, highlight_color: u32) -> Result<Workbook> {
    let changed: FxHashSet<(usize, usize)> = report.changed_cells().collect();
    let formats = CellFormats::new(highlight_color);

    let mut workbook = Workbook::new();

    for (name, table) in [
        (LEFT_SHEET, &report.aligned.left),
        (RIGHT_SHEET, &report.aligned.right),
    ] {
        let worksheet = workbook
            .add_worksheet()
            .set_name(name)
            .with_context(|| format!("Failed to create sheet '{}'", name))?;
        write_table(worksheet, table, &changed, &formats)
            .with_context(|| format!("Failed to write sheet '{}'", name))?;
    }

    let summary = workbook
        .add_worksheet()
        .set_name(SUMMARY_SHEET)
        .with_context(|| format!("Failed to create sheet '{}'", SUMMARY_SHEET))?;
    for (row, line) in summary_lines(report).iter().enumerate() {
        summary.write_string(row as u32, 0, line)?;
    }

    Ok(workbook)
}

/// The Summary sheet's column A, top to bottom
pub fn summary_lines(report: &DiffReport) -> [String; 5] {
    [
        "Comparison Summary".to_string(),
        format!("Total cells changed: {}", report.total_changes),
        format!("Rows in File1: {}", report.stats.left_row_count),
        format!("Rows in File2: {}", report.stats.right_row_count),
        format!("Columns compared: {}", report.stats.columns_compared),
    ]
}

fn sheet_col(c: usize) -> Result<u16> {
    u16::try_from(c).with_context(|| format!("Column {} exceeds the worksheet limit", c + 1))
}

fn sheet_row(r: usize) -> Result<u32> {
    u32::try_from(r).with_context(|| format!("Row {} exceeds the worksheet limit", r))
}

/// Write a header row then the data; `changed` holds raw (row, column) pairs
fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    changed: &FxHashSet<(usize, usize)>,
    formats: &CellFormats,
) -> Result<()> {
    for (c, column) in table.columns.iter().enumerate() {
        worksheet.write_string(0, sheet_col(c)?, &column.name)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row32 = sheet_row(r + 1)?;
        for (c, value) in row.cells.iter().enumerate() {
            let format = formats.for_value(value, changed.contains(&(r, c)));
            write_cell(worksheet, row32, sheet_col(c)?, value, format)?;
        }
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<()> {
    if let (Some(datetime), Some(format)) = (excel_datetime(value), format) {
        worksheet.write_datetime_with_format(row, col, &datetime, format)?;
        return Ok(());
    }

    match (value, format) {
        (CellValue::Empty, None) => {}
        // Blank cells still carry the fill
        (CellValue::Empty, Some(format)) => {
            worksheet.write_blank(row, col, format)?;
        }
        (CellValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (CellValue::Bool(b), Some(format)) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        (CellValue::Int(i), None) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        (CellValue::Int(i), Some(format)) => {
            worksheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        (CellValue::Float(f), None) if f.is_finite() => {
            worksheet.write_number(row, col, *f)?;
        }
        (CellValue::Float(f), Some(format)) if f.is_finite() => {
            worksheet.write_number_with_format(row, col, *f, format)?;
        }
        // Text, NaN/inf and dates Excel cannot represent
        (_, None) => {
            worksheet.write_string(row, col, value.display())?;
        }
        (_, Some(format)) => {
            worksheet.write_string_with_format(row, col, value.display(), format)?;
        }
    }
    Ok(())
}

/// Excel serial date for a date cell; `None` outside Excel's 1900..=9999 range
fn excel_datetime(value: &CellValue) -> Option<ExcelDateTime> {
    let (date, time) = match value {
        CellValue::Date(d) => (*d, NaiveTime::MIN),
        CellValue::DateTime(dt) => (dt.date(), dt.time()),
        _ => return None,
    };
    let year = u16::try_from(date.year()).ok()?;
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    let hour = u16::try_from(time.hour()).ok()?;
    let minute = u8::try_from(time.minute()).ok()?;
    let seconds = f64::from(time.second()) + f64::from(time.nanosecond()) / 1e9;

    ExcelDateTime::from_ymd(year, month, day)
        .and_then(|d| d.and_hms(hour, minute, seconds))
        .ok()
}
