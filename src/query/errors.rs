use thiserror::Error;

use crate::catalog::errors::CatalogError;
use crate::executor::ExecutorError;

/// Construction-time defects, raised synchronously at the builder call that
/// introduces them. None are retried or recovered inside the core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryBuildError {
    #[error("alias '{name}' is already in scope")]
    DuplicateAlias { name: String },

    #[error("alias '{name}' is not in scope")]
    UnknownAlias { name: String },

    #[error("no visible table of row type {row_type} has column '{column}'")]
    UnknownColumn {
        column: String,
        row_type: &'static str,
    },

    #[error("column '{column}' is ambiguous across aliases {matches:?}")]
    AmbiguousColumn {
        column: String,
        matches: Vec<String>,
    },

    #[error("join on '{alias}' was never given a completed on-condition")]
    IncompleteJoin { alias: String },

    #[error("'{name}' is not a valid alias name")]
    InvalidAliasName { name: String },

    #[error("duplicate projection label '{label}'")]
    DuplicateProjectionLabel { label: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Terminal-operation error: either the statement could not be built, or the
/// executor reported a failure, or the returned row count did not fit the
/// requested shape.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Build(#[from] QueryBuildError),

    #[error(transparent)]
    Execute(#[from] ExecutorError),

    #[error("expected at most one row, data source returned {got}")]
    TooManyRows { got: usize },

    #[error("expected exactly one row, data source returned none")]
    NoRows,
}
