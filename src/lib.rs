//! sheetdiff - Cell-by-cell diff for spreadsheets
//!
//! Loads two tabular files, aligns them onto the union of their columns and
//! rows, and reports every cell that differs. Reports can be rendered to the
//! terminal or exported as a highlighted workbook plus a CSV difference list.

pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use diff::{compute_diff, DiffRecord, DiffReport};
pub use error::DiffError;
pub use export::ReportExporter;
pub use model::Table;
