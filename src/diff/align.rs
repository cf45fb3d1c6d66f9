//! Outer-join alignment of two tables

use indexmap::IndexSet;

use crate::model::{CellValue, Column, Row, Table};

/// Two tables reshaped onto a shared column set and row domain
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTablePair {
    pub left: Table,
    pub right: Table,
}

impl AlignedTablePair {
    /// Shared column names in aligned order
    pub fn columns(&self) -> &[Column] {
        &self.left.columns
    }

    /// Number of rows in the shared row domain
    pub fn row_count(&self) -> usize {
        self.left.row_count()
    }
}

/// Align two tables on the union of their columns and row indices
///
/// Identical column sequences keep their order; otherwise the union is sorted
/// ascending. Cells missing from either side become [`CellValue::Empty`].
pub fn align(left: &Table, right: &Table) -> AlignedTablePair {
    let same_columns = left.column_names().eq(right.column_names());

    let mut union: IndexSet<&str> = left.column_names().chain(right.column_names()).collect();
    if !same_columns {
        union.sort();
    }

    let columns: Vec<Column> = union
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(*name, i))
        .collect();
    let row_count = left.row_count().max(right.row_count());

    log::debug!(
        "aligned {}x{} and {}x{} onto {}x{}",
        left.row_count(),
        left.column_count(),
        right.row_count(),
        right.column_count(),
        row_count,
        columns.len()
    );

    AlignedTablePair {
        left: reindex(left, &columns, row_count),
        right: reindex(right, &columns, row_count),
    }
}

fn reindex(table: &Table, columns: &[Column], row_count: usize) -> Table {
    let sources: Vec<Option<usize>> = columns
        .iter()
        .map(|c| table.column_index(&c.name))
        .collect();

    let rows = (0..row_count)
        .map(|r| {
            let cells = sources
                .iter()
                .map(|source| {
                    source
                        .and_then(|c| table.cell(r, c))
                        .cloned()
                        .unwrap_or(CellValue::Empty)
                })
                .collect();
            let source_line = table.rows.get(r).map_or(r + 2, |row| row.source_line);
            Row::new(cells, source_line)
        })
        .collect();

    Table {
        columns: columns.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_columns_keep_order() {
        let a = Table::from_rows(["Name", "Age"], [["Tom", "30"]]);
        let b = Table::from_rows(["Name", "Age"], [["Tom", "31"]]);
        let pair = align(&a, &b);

        let names: Vec<_> = pair.left.column_names().collect();
        assert_eq!(names, ["Name", "Age"]);
    }

    #[test]
    fn test_union_is_sorted_when_columns_differ() {
        let a = Table::from_rows(["Name"], [["Tom"], ["Ana"]]);
        let b = Table::from_rows(["Name", "Age"], [["Tom", "31"], ["Ana", ""]]);
        let pair = align(&a, &b);

        let left: Vec<_> = pair.left.column_names().collect();
        let right: Vec<_> = pair.right.column_names().collect();
        assert_eq!(left, ["Age", "Name"]);
        assert_eq!(left, right);
        assert_eq!(pair.left.cell(0, 0), Some(&CellValue::Empty));
        assert_eq!(pair.left.cell(0, 1), Some(&CellValue::from("Tom")));
        assert_eq!(pair.right.cell(0, 0), Some(&CellValue::from("31")));
    }

    #[test]
    fn test_case_variants_stay_distinct() {
        let a = Table::from_rows(["name"], [["Tom"]]);
        let b = Table::from_rows(["Name"], [["Tom"]]);
        let pair = align(&a, &b);

        let names: Vec<_> = pair.left.column_names().collect();
        assert_eq!(names, ["Name", "name"]);
    }

    #[test]
    fn test_row_domain_is_union() {
        let a = Table::from_rows(["x"], [["1"], ["2"], ["3"]]);
        let b = Table::from_rows(["x"], [["1"]]);
        let pair = align(&a, &b);

        assert_eq!(pair.left.row_count(), 3);
        assert_eq!(pair.right.row_count(), 3);
        assert_eq!(pair.right.cell(2, 0), Some(&CellValue::Empty));
        assert_eq!(pair.right.rows[2].source_line, 4);
    }

    #[test]
    fn test_aligned_shapes_match() {
        let a = Table::from_rows(["a", "b"], [["1", "2"]]);
        let b = Table::from_rows(["c"], [["3"], ["4"]]);
        let pair = align(&a, &b);

        assert_eq!(pair.left.columns, pair.right.columns);
        assert_eq!(pair.left.row_count(), pair.right.row_count());
        assert!(pair.left.rows.iter().all(|r| r.cells.len() == 3));
        assert!(pair.right.rows.iter().all(|r| r.cells.len() == 3));
    }
}
