//! Column name normalization

use rustc_hash::FxHashMap;

use crate::error::DiffError;
use crate::model::{Column, Table};

/// Strip surrounding whitespace and every internal space from a header
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "")
}

/// Normalize every column name of a table
///
/// Fails when two headers collapse onto the same name, since lookups by
/// name would otherwise silently resolve to only one of them.
pub fn normalize_columns(table: Table) -> Result<Table, DiffError> {
    let mut seen: FxHashMap<String, String> = FxHashMap::default();
    let mut columns = Vec::with_capacity(table.columns.len());

    for column in &table.columns {
        let name = normalize_column_name(&column.name);
        if let Some(first) = seen.get(&name) {
            return Err(DiffError::DuplicateColumn {
                name,
                first: first.clone(),
                second: column.name.clone(),
            });
        }
        seen.insert(name.clone(), column.name.clone());
        columns.push(Column::new(name, column.index));
    }

    Ok(Table {
        columns,
        rows: table.rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("  First Name "), "FirstName");
        assert_eq!(normalize_column_name("\tAge\n"), "Age");
        assert_eq!(normalize_column_name("a b  c"), "abc");
        // Case is preserved
        assert_eq!(normalize_column_name("Name"), "Name");
        assert_ne!(normalize_column_name("name"), normalize_column_name("Name"));
    }

    #[test]
    fn test_normalize_columns_keeps_rows() {
        let table = Table::from_rows([" Name ", "Home Town"], [["Tom", "Oslo"]]);
        let normalized = normalize_columns(table.clone()).unwrap();

        let names: Vec<_> = normalized.column_names().collect();
        assert_eq!(names, ["Name", "HomeTown"]);
        assert_eq!(normalized.rows, table.rows);
    }

    #[test]
    fn test_duplicate_after_normalization_fails() {
        let table = Table::from_rows(["First Name", "FirstName"], [["a", "b"]]);
        let err = normalize_columns(table).unwrap_err();

        assert_eq!(
            err,
            DiffError::DuplicateColumn {
                name: "FirstName".to_string(),
                first: "First Name".to_string(),
                second: "FirstName".to_string(),
            }
        );
    }
}
