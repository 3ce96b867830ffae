//! The accumulated statement builder.
//!
//! `Select<T>` carries everything one statement has gathered so far: the
//! scope of visible aliases, the from-clause, the projection and the composed
//! row mapper for the tuple `T`. Every operation returns a new value; a prior
//! builder is never mutated, so sibling statements can be grown from a shared
//! base without synchronization.

use std::sync::Arc;

use crate::catalog::row::RowMapper;
use crate::catalog::Database;
use crate::executor::SqlExecutor;

use super::alias::Alias;
use super::errors::{QueryBuildError, QueryError};
use super::from::{FromClause, JoinEntry, JoinType};
use super::join_clause::JoinClauseStart;
use super::projection::Projection;
use super::scope::Scope;
use super::tuple::{RowTuple, TupleAppend};
use super::{RenderedSelect, ToSql};

pub struct Select<T> {
    scope: Scope,
    from: FromClause,
    projection: Projection,
    mapper: RowMapper<T>,
}

impl<T> Clone for Select<T> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            from: self.from.clone(),
            projection: self.projection.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

/// Statement entry points on the catalog handle.
impl Database {
    /// Start a statement from one base alias. Its whole-alias projection and
    /// row extractor seed the 1-tuple builder.
    pub fn from<R: 'static>(&self, alias: Alias<R>) -> Select<(R,)> {
        let info = alias.info().clone();
        let scope = Scope::new(self.clone()).pushed(info.clone());
        let projection = Projection::default().plus_whole_alias(info.clone());
        let extract = alias.row_mapper();
        let mapper: RowMapper<(R,)> = Arc::new(move |row| Ok((extract(row)?,)));
        Select {
            scope,
            from: FromClause::new(info),
            projection,
            mapper,
        }
    }

    /// Bind the registered table for `R` to a fresh alias.
    pub fn alias<R: 'static>(&self, name: &str) -> Result<Alias<R>, QueryBuildError> {
        self.table::<R>()?.as_alias(name)
    }

    /// Start a statement by table identity instead of a pre-built alias.
    pub fn from_table<R: 'static>(&self, alias_name: &str) -> Result<Select<(R,)>, QueryBuildError> {
        Ok(self.from(self.alias::<R>(alias_name)?))
    }
}

impl<T: RowTuple> Select<T> {
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub(crate) fn with_join(&self, entry: JoinEntry) -> Select<T> {
        let mut next = self.clone();
        next.from = next.from.with_join(entry);
        next
    }

    fn join_with<R: 'static>(
        &self,
        join_type: JoinType,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        let scope = self.scope.plus(&alias)?;
        let projection = self.projection.plus_whole_alias(alias.info().clone());
        let prev = Arc::clone(&self.mapper);
        let extract = alias.row_mapper();
        let mapper: RowMapper<T::Appended> =
            Arc::new(move |row| Ok(prev(row)?.append(extract(row)?)));
        let select = Select {
            scope,
            from: self.from.clone(),
            projection,
            mapper,
        };
        Ok(JoinClauseStart::new(select, join_type, alias.info().clone()))
    }

    fn join_table_with<R: 'static>(
        &self,
        join_type: JoinType,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        let alias = self.scope.database().alias::<R>(alias_name)?;
        self.join_with(join_type, alias)
    }

    pub fn join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_with(JoinType::Inner, alias)
    }

    pub fn join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_table_with::<R>(JoinType::Inner, alias_name)
    }

    pub fn left_join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_with(JoinType::LeftOuter, alias)
    }

    pub fn left_join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_table_with::<R>(JoinType::LeftOuter, alias_name)
    }

    pub fn right_join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_with(JoinType::RightOuter, alias)
    }

    pub fn right_join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_table_with::<R>(JoinType::RightOuter, alias_name)
    }

    pub fn full_outer_join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_with(JoinType::FullOuter, alias)
    }

    pub fn full_outer_join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.join_table_with::<R>(JoinType::FullOuter, alias_name)
    }

    /// Render the accumulated statement to SQL text plus positional
    /// arguments. Deterministic: clause order is exactly builder call order.
    pub fn render(&self) -> Result<RenderedSelect, QueryBuildError> {
        let columns = self.projection.render()?;
        let select_list: Vec<String> = columns.iter().map(|c| c.to_sql()).collect();
        let mut sql = format!("select {} ", select_list.join(", "));
        let mut args = Vec::new();
        self.from.render_into(&mut sql, &mut args)?;
        log::debug!(
            "rendered select over {} table(s): {}",
            T::ARITY,
            sql
        );
        Ok(RenderedSelect { sql, args })
    }

    /// Execute and collect every mapped tuple in row order.
    pub fn list<E: SqlExecutor + ?Sized>(&self, executor: &E) -> Result<Vec<T>, QueryError> {
        let rendered = self.render()?;
        Ok(executor.query(&rendered.sql, &rendered.args, Arc::clone(&self.mapper))?)
    }

    /// Execute expecting zero or one row.
    pub fn optional<E: SqlExecutor + ?Sized>(&self, executor: &E) -> Result<Option<T>, QueryError> {
        let mut rows = self.list(executor)?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            got => Err(QueryError::TooManyRows { got }),
        }
    }

    /// Execute expecting exactly one row.
    pub fn single<E: SqlExecutor + ?Sized>(&self, executor: &E) -> Result<T, QueryError> {
        self.optional(executor)?.ok_or(QueryError::NoRows)
    }
}
