//! Alias binding: one table under one short name for one statement.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::catalog::column::{ColumnDef, ColumnRef};
use crate::catalog::row::RowMapper;
use crate::catalog::TableSchema;

use super::errors::QueryBuildError;

/// The type-erased core of an alias, shared by scopes, from-clauses and
/// projections. Carries everything resolution and rendering need without the
/// row type parameter.
#[derive(Debug, Clone)]
pub(crate) struct AliasInfo {
    pub(crate) name: String,
    pub(crate) qualified_table: String,
    pub(crate) row_type: TypeId,
    pub(crate) row_type_name: &'static str,
    pub(crate) columns: Arc<[ColumnDef]>,
}

impl AliasInfo {
    pub(crate) fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

/// A named binding of one table within one statement.
///
/// Pure value: constructing an alias is context-free; uniqueness of the name
/// is enforced when the alias enters a [`Scope`](super::scope::Scope).
pub struct Alias<R> {
    table: Arc<TableSchema<R>>,
    info: AliasInfo,
}

impl<R: 'static> Alias<R> {
    pub fn new(table: Arc<TableSchema<R>>, name: &str) -> Result<Self, QueryBuildError> {
        if !valid_alias_name(name) {
            return Err(QueryBuildError::InvalidAliasName {
                name: name.to_string(),
            });
        }
        let info = AliasInfo {
            name: name.to_string(),
            qualified_table: table.qualified_name(),
            row_type: TypeId::of::<R>(),
            row_type_name: std::any::type_name::<R>(),
            columns: table.column_defs(),
        };
        Ok(Self { table, info })
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Qualified reference to one of this alias's columns, e.g. `p.ID`.
    pub fn column<T>(&self, column: ColumnRef<R, T>) -> Result<String, QueryBuildError> {
        if !self.info.has_column(column.name()) {
            return Err(QueryBuildError::UnknownColumn {
                column: column.name().to_string(),
                row_type: self.info.row_type_name,
            });
        }
        Ok(format!("{}.{}", self.info.name, column.name()))
    }

    /// Row extractor scoped to this alias's disambiguated column labels.
    pub fn row_mapper(&self) -> RowMapper<R> {
        Arc::clone(&self.table).row_mapper(Some(&self.info.name))
    }

    pub(crate) fn info(&self) -> &AliasInfo {
        &self.info
    }
}

impl<R> Clone for Alias<R> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            info: self.info.clone(),
        }
    }
}

impl<R> fmt::Debug for Alias<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alias")
            .field("name", &self.info.name)
            .field("table", &self.info.qualified_table)
            .finish()
    }
}

fn valid_alias_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Bind this table to a short name, Java-DSL style entry point:
/// `database.table::<Parent>()?.as_alias("p")?`.
impl<R: 'static> TableSchema<R> {
    pub fn as_alias(self: Arc<Self>, name: &str) -> Result<Alias<R>, QueryBuildError> {
        Alias::new(self, name)
    }
}
