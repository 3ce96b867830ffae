use thiserror::Error;

/// Errors raised while declaring or looking up catalog entries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("no table registered for row type {row_type}")]
    UnknownTable { row_type: &'static str },

    #[error("a table for row type {row_type} is already registered")]
    DuplicateTable { row_type: &'static str },

    #[error("duplicate column '{column}' on table {table}")]
    DuplicateColumn { table: String, column: String },
}

/// Errors raised while extracting a typed row from a physical result row.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RowError {
    #[error("result row has no column labelled '{label}'")]
    MissingColumn { label: String },

    #[error("column '{label}' holds {actual}, expected {expected}")]
    TypeMismatch {
        label: String,
        expected: &'static str,
        actual: String,
    },
}
