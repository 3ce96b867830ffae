//! Statement construction: aliases, scopes, projections, joins, rendering.

pub mod alias;
pub mod errors;
pub mod from;
pub mod join_clause;
pub mod projection;
pub mod scope;
pub mod select;
pub mod tuple;

pub use alias::Alias;
pub use errors::{QueryBuildError, QueryError};
pub use from::{Comparison, ComparisonTerm, JoinCondition, JoinType, Operand};
pub use join_clause::{JoinClauseBuilder, JoinClauseStart, JoinComparison};
pub use projection::{Projection, SelectColumn};
pub use scope::Scope;
pub use select::Select;
pub use tuple::{RowTuple, TupleAppend};

use serde::{Deserialize, Serialize};

use crate::catalog::row::SqlValue;

/// Convert a statement fragment to its SQL text.
pub trait ToSql {
    fn to_sql(&self) -> String;
}

/// A fully rendered statement: SQL text plus its positional arguments, in
/// placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSelect {
    pub sql: String,
    pub args: Vec<SqlValue>,
}
