//! Error types for the diff core

use thiserror::Error;

/// Errors raised while preparing tables for comparison
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    /// Two headers collapse to the same name once whitespace is removed
    #[error("duplicate column '{name}' after normalization (from headers '{first}' and '{second}')")]
    DuplicateColumn {
        name: String,
        first: String,
        second: String,
    },
}
