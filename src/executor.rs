//! The consumed execution boundary.
//!
//! The core treats execution purely as a sink: terminal operations hand a
//! rendered statement, its positional arguments and a composed row mapper to
//! an [`SqlExecutor`] and reshape what comes back. No connections,
//! transactions, retries or timeouts live here; data-source failures pass
//! through unmodified.

use thiserror::Error;

use crate::catalog::errors::RowError;
use crate::catalog::row::{ResultRow, RowMapper, SqlValue};

/// Errors surfaced by an executor call.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Row(#[from] RowError),

    #[error("data source error: {0}")]
    DataSource(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Runs rendered SQL against a data source.
///
/// `query` binds `args` positionally, applies `mapper` to every returned row
/// and yields the mapped values in row order. `execute` runs a statement that
/// returns an update count instead of rows.
pub trait SqlExecutor {
    fn query<T>(
        &self,
        sql: &str,
        args: &[SqlValue],
        mapper: RowMapper<T>,
    ) -> Result<Vec<T>, ExecutorError>;

    fn execute(&self, sql: &str, args: &[SqlValue]) -> Result<u64, ExecutorError>;
}

/// Map raw rows through a mapper, stopping at the first extraction failure.
///
/// Convenience for executor implementations that fetch [`ResultRow`]s and
/// apply the mapper themselves.
pub fn map_rows<T>(rows: &[ResultRow], mapper: &RowMapper<T>) -> Result<Vec<T>, ExecutorError> {
    rows.iter()
        .map(|row| mapper(row).map_err(ExecutorError::from))
        .collect()
}
