//! Data model for tabular data representation

mod column;
mod table;

pub use column::Column;
pub use table::{CellValue, Row, Table};
