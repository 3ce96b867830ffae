//! sqlect - compile-time-checked SELECT construction
//!
//! This crate builds multi-table select statements through:
//! - Static table/column declarations, checked at statement-build time
//! - Scope-tracked alias binding and column resolution
//! - An incremental, typestate on-condition builder per join
//! - Deterministic SQL rendering with positional arguments
//! - Typed tuple row mapping composed per joined table
//!
//! ```
//! use sqlect::catalog::{ColumnRef, DataType, Database, RowReader, TableSchema};
//!
//! #[derive(Debug, PartialEq)]
//! struct Parent { id: i64 }
//!
//! impl Parent {
//!     const ID: ColumnRef<Parent, i64> = ColumnRef::new("ID");
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Child { parent_id: i64 }
//!
//! impl Child {
//!     const PARENT_ID: ColumnRef<Child, i64> = ColumnRef::new("PARENT_ID");
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let database = Database::builder()
//!     .default_schema("TEST")
//!     .table(
//!         TableSchema::<Parent>::builder("PARENT")
//!             .column("ID", DataType::Integer, |p: &Parent| p.id.into())
//!             .build(|r: &RowReader| Ok(Parent { id: r.get("ID")? }))?,
//!     )
//!     .table(
//!         TableSchema::<Child>::builder("CHILD")
//!             .column("PARENT_ID", DataType::Integer, |c: &Child| c.parent_id.into())
//!             .build(|r: &RowReader| Ok(Child { parent_id: r.get("PARENT_ID")? }))?,
//!     )
//!     .build()?;
//!
//! let p = database.alias::<Parent>("p")?;
//! let c = database.alias::<Child>("c")?;
//! let rendered = database
//!     .from(p)
//!     .join(c)?
//!     .on(Parent::ID)?
//!     .is_equal_to(Child::PARENT_ID)?
//!     .render()?;
//!
//! assert_eq!(
//!     rendered.sql,
//!     "select p.ID as p_ID, c.PARENT_ID as c_PARENT_ID \
//!      from TEST.PARENT as p join TEST.CHILD as c on p.ID = c.PARENT_ID"
//! );
//! assert!(rendered.args.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod executor;
pub mod query;

pub use catalog::{
    ColumnDef, ColumnRef, DataType, Database, FromSql, ResultRow, RowMapper, RowReader, SqlValue,
    TableSchema,
};
pub use executor::{ExecutorError, SqlExecutor};
pub use query::{
    Alias, JoinType, Projection, QueryBuildError, QueryError, RenderedSelect, Scope, Select,
};
