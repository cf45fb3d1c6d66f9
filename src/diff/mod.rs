//! Diff engine for comparing tables

mod align;
mod normalize;

use serde::{Deserialize, Serialize};

use crate::error::DiffError;
use crate::model::{CellValue, Table};

pub use align::{align, AlignedTablePair};
pub use normalize::{normalize_column_name, normalize_columns};

/// Offset from a raw 0-based row index to the row a spreadsheet viewer shows
/// (1-based, plus the header row)
pub const DISPLAY_ROW_OFFSET: usize = 2;

/// A single differing cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Display row number (raw index + 2)
    pub row: usize,
    /// Column name
    pub column: String,
    /// Column index in the aligned tables
    #[serde(skip)]
    pub column_index: usize,
    /// Value in the first file
    #[serde(rename = "file1_value")]
    pub left_value: CellValue,
    /// Value in the second file
    #[serde(rename = "file2_value")]
    pub right_value: CellValue,
}

impl DiffRecord {
    /// Raw (row, column) coordinates in the aligned tables
    pub fn cell(&self) -> (usize, usize) {
        (self.row - DISPLAY_ROW_OFFSET, self.column_index)
    }
}

/// Statistics about the comparison
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Rows in the first file before alignment
    pub left_row_count: usize,
    /// Rows in the second file before alignment
    pub right_row_count: usize,
    /// Rows in the shared row domain
    pub aligned_row_count: usize,
    /// Columns in the shared column set
    pub columns_compared: usize,
}

/// Result of comparing two tables
#[derive(Debug, Clone, PartialEq)]
pub struct DiffReport {
    /// Differing cells in row-major, then column order
    pub records: Vec<DiffRecord>,
    /// Total number of differing cells
    pub total_changes: usize,
    pub stats: DiffStats,
    /// The aligned tables the records refer to
    pub aligned: AlignedTablePair,
}

impl DiffReport {
    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total_changes > 0
    }

    /// Raw coordinates of every differing cell
    pub fn changed_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.records.iter().map(DiffRecord::cell)
    }
}

/// Compare an aligned pair cell by cell
///
/// Records and highlight coordinates come out of the same pass. Original row
/// counts are taken from `left_rows`/`right_rows` since alignment pads both
/// sides to the same length.
pub fn diff(aligned: AlignedTablePair, left_rows: usize, right_rows: usize) -> DiffReport {
    let mut records = Vec::new();

    for (r, (left_row, right_row)) in aligned.left.rows.iter().zip(&aligned.right.rows).enumerate() {
        let cells = aligned
            .columns()
            .iter()
            .zip(&left_row.cells)
            .zip(&right_row.cells)
            .enumerate();

        for (c, ((column, left_value), right_value)) in cells {
            if left_value != right_value {
                records.push(DiffRecord {
                    row: r + DISPLAY_ROW_OFFSET,
                    column: column.name.clone(),
                    column_index: c,
                    left_value: left_value.clone(),
                    right_value: right_value.clone(),
                });
            }
        }
    }

    let stats = DiffStats {
        left_row_count: left_rows,
        right_row_count: right_rows,
        aligned_row_count: aligned.row_count(),
        columns_compared: aligned.columns().len(),
    };
    log::debug!(
        "{} differing cells across {} rows and {} columns",
        records.len(),
        stats.aligned_row_count,
        stats.columns_compared
    );

    DiffReport {
        total_changes: records.len(),
        records,
        stats,
        aligned,
    }
}

/// Stateless differ running normalize, align and diff in sequence
pub struct TableDiffer;

impl TableDiffer {
    /// Compare two raw tables
    pub fn compare(left: Table, right: Table) -> Result<DiffReport, DiffError> {
        let left = normalize_columns(left)?;
        let right = normalize_columns(right)?;
        Ok(Self::compare_normalized(&left, &right))
    }

    /// Compare two tables whose headers are already normalized
    pub fn compare_normalized(left: &Table, right: &Table) -> DiffReport {
        let aligned = align(left, right);
        diff(aligned, left.row_count(), right.row_count())
    }
}

/// Convenience function to compute diff
pub fn compute_diff(left: Table, right: Table) -> Result<DiffReport, DiffError> {
    TableDiffer::compare(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(ages: [&str; 2]) -> Table {
        Table::from_rows(["Name", "Age"], [["Tom", ages[0]], ["Ana", ages[1]]])
    }

    #[test]
    fn test_single_changed_cell() {
        let report = compute_diff(people(["30", "25"]), people(["31", "25"])).unwrap();

        assert_eq!(report.total_changes, 1);
        assert_eq!(
            report.records,
            vec![DiffRecord {
                row: 2,
                column: "Age".to_string(),
                column_index: 1,
                left_value: CellValue::from("30"),
                right_value: CellValue::from("31"),
            }]
        );
        assert_eq!(report.changed_cells().collect::<Vec<_>>(), [(0, 1)]);
    }

    #[test]
    fn test_identical_tables_have_no_changes() {
        let report = compute_diff(people(["30", "25"]), people(["30", "25"])).unwrap();

        assert!(!report.has_changes());
        assert_eq!(report.total_changes, 0);
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_missing_column_filled_with_empty() {
        let a = Table::from_rows(["Name"], [["Tom"], ["Ana"]]);
        let b = Table::from_rows(["Name", "Age"], [["Tom", "31"], ["Ana", ""]]);
        let report = compute_diff(a, b).unwrap();

        assert_eq!(report.total_changes, 1);
        let record = &report.records[0];
        assert_eq!(record.row, 2);
        assert_eq!(record.column, "Age");
        assert_eq!(record.left_value, CellValue::Empty);
        assert_eq!(record.right_value, CellValue::from("31"));
    }

    #[test]
    fn test_display_row_offset() {
        let left: Vec<[&str; 1]> = (0..6).map(|_| ["same"]).collect();
        let mut right = left.clone();
        right[5] = ["changed"];
        let report = compute_diff(
            Table::from_rows(["x"], left),
            Table::from_rows(["x"], right),
        )
        .unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].row, 7);
        assert_eq!(report.records[0].cell(), (5, 0));
    }

    #[test]
    fn test_row_major_order() {
        let a = Table::from_rows(["a", "b"], [["1", "2"], ["3", "4"]]);
        let b = Table::from_rows(["a", "b"], [["x", "y"], ["z", "w"]]);
        let report = compute_diff(a, b).unwrap();

        let order: Vec<_> = report
            .records
            .iter()
            .map(|r| (r.row, r.column.as_str()))
            .collect();
        assert_eq!(order, [(2, "a"), (2, "b"), (3, "a"), (3, "b")]);
    }

    #[test]
    fn test_count_is_symmetric() {
        let a = Table::from_rows(["Name", "City"], [["Tom", "Oslo"], ["Ana", "Rome"], ["Bo", ""]]);
        let b = Table::from_rows(["Name", "Age"], [["Tom", "31"], ["Eve", "25"]]);

        let forward = compute_diff(a.clone(), b.clone()).unwrap();
        let backward = compute_diff(b, a).unwrap();

        assert_eq!(forward.total_changes, backward.total_changes);
        for (f, b) in forward.records.iter().zip(&backward.records) {
            assert_eq!(f.left_value, b.right_value);
            assert_eq!(f.right_value, b.left_value);
        }
    }

    #[test]
    fn test_diff_is_deterministic() {
        let a = Table::from_rows(["k", "v"], [["1", "a"], ["2", "b"]]);
        let b = Table::from_rows(["v", "k"], [["a", "1"], ["c", "3"]]);

        let first = compute_diff(a.clone(), b.clone()).unwrap();
        let second = compute_diff(a, b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_numeric_and_text_are_distinct() {
        let a = Table::from_rows(["n"], [[CellValue::Int(5)], [CellValue::Int(30)]]);
        let b = Table::from_rows(["n"], [[CellValue::from("5")], [CellValue::Float(30.0)]]);
        let report = compute_diff(a, b).unwrap();

        assert_eq!(report.total_changes, 1);
        assert_eq!(report.records[0].row, 2);
    }

    #[test]
    fn test_stats_keep_original_row_counts() {
        let a = Table::from_rows(["x"], [["1"], ["2"], ["3"]]);
        let b = Table::from_rows(["x", "y"], [["1", "a"]]);
        let report = compute_diff(a, b).unwrap();

        assert_eq!(
            report.stats,
            DiffStats {
                left_row_count: 3,
                right_row_count: 1,
                aligned_row_count: 3,
                columns_compared: 2,
            }
        );
    }

    #[test]
    fn test_whitespace_in_headers_is_ignored() {
        let a = Table::from_rows([" First Name "], [["Tom"]]);
        let b = Table::from_rows(["FirstName"], [["Tom"]]);
        let report = compute_diff(a, b).unwrap();

        assert!(!report.has_changes());
        assert_eq!(report.stats.columns_compared, 1);
    }

    #[test]
    fn test_duplicate_columns_are_rejected() {
        let a = Table::from_rows(["A B", "AB"], [["1", "2"]]);
        let b = Table::from_rows(["AB"], [["1"]]);

        assert!(matches!(
            compute_diff(a, b),
            Err(DiffError::DuplicateColumn { .. })
        ));
    }
}
