//! Scope-aware column resolution for statement construction.
//!
//! `Scope` is the single source of truth for which aliases are visible at any
//! point while a statement is being built, and for turning typed column
//! references into qualified SQL names. Scopes are append-only values:
//! `plus` returns an extended copy, so sibling builders (e.g. two statements
//! grown from the same base) never observe each other's aliases. A nested
//! scope keeps a lookup-only back-reference to its parent for outer-column
//! resolution in sub-selects.

use std::any::TypeId;
use std::sync::Arc;

use crate::catalog::column::ColumnRef;
use crate::catalog::Database;

use super::alias::{Alias, AliasInfo};
use super::errors::QueryBuildError;

#[derive(Debug, Clone)]
pub struct Scope {
    database: Database,
    aliases: Vec<AliasInfo>,
    parent: Option<Arc<Scope>>,
}

impl Scope {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            aliases: Vec::new(),
            parent: None,
        }
    }

    /// A child scope resolving against this one for outer columns.
    pub fn nest(&self) -> Scope {
        Self {
            database: self.database.clone(),
            aliases: Vec::new(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// The catalog handle, for builders that join by table identity.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Extend by one alias. Fails if the name is already bound here or in
    /// any ancestor scope; shadowing is never silent.
    pub fn plus<R: 'static>(&self, alias: &Alias<R>) -> Result<Scope, QueryBuildError> {
        if self.lookup(alias.name()).is_some() {
            return Err(QueryBuildError::DuplicateAlias {
                name: alias.name().to_string(),
            });
        }
        Ok(self.pushed(alias.info().clone()))
    }

    /// Append without the duplicate check; reserved for the first alias of a
    /// fresh statement, where no collision is possible.
    pub(crate) fn pushed(&self, info: AliasInfo) -> Scope {
        let mut extended = self.clone();
        extended.aliases.push(info);
        extended
    }

    /// Resolve a column reference by type-based inference: exactly one
    /// visible alias must expose `R` with this column declared.
    pub fn resolve<R: 'static, V>(
        &self,
        column: ColumnRef<R, V>,
    ) -> Result<String, QueryBuildError> {
        let mut matches = Vec::new();
        self.collect_matches(TypeId::of::<R>(), column.name(), &mut matches);
        if matches.is_empty() {
            log::debug!("resolve {}: no visible alias", column.name());
            return Err(QueryBuildError::UnknownColumn {
                column: column.name().to_string(),
                row_type: std::any::type_name::<R>(),
            });
        }
        if matches.len() > 1 {
            log::debug!("resolve {}: ambiguous across {:?}", column.name(), matches);
            return Err(QueryBuildError::AmbiguousColumn {
                column: column.name().to_string(),
                matches,
            });
        }
        let qualified = format!("{}.{}", matches[0], column.name());
        log::debug!("resolve {} -> {}", column.name(), qualified);
        Ok(qualified)
    }

    /// Resolve directly against a hinted alias name.
    pub fn resolve_hinted<R: 'static, V>(
        &self,
        alias_name: &str,
        column: ColumnRef<R, V>,
    ) -> Result<String, QueryBuildError> {
        let info = self
            .lookup(alias_name)
            .ok_or_else(|| QueryBuildError::UnknownAlias {
                name: alias_name.to_string(),
            })?;
        if info.row_type != TypeId::of::<R>() || !info.has_column(column.name()) {
            return Err(QueryBuildError::UnknownColumn {
                column: column.name().to_string(),
                row_type: std::any::type_name::<R>(),
            });
        }
        Ok(format!("{}.{}", info.name, column.name()))
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&AliasInfo> {
        self.aliases
            .iter()
            .find(|a| a.name == name)
            .or_else(|| self.parent.as_deref().and_then(|p| p.lookup(name)))
    }

    fn collect_matches(&self, row_type: TypeId, column: &str, matches: &mut Vec<String>) {
        for alias in &self.aliases {
            if alias.row_type == row_type && alias.has_column(column) {
                matches.push(alias.name.clone());
            }
        }
        if let Some(parent) = self.parent.as_deref() {
            parent.collect_matches(row_type, column, matches);
        }
    }
}
