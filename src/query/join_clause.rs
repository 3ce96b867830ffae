//! The incremental on-condition builder for one join.
//!
//! The states are separate types, so the legal call sequence is enforced by
//! the compiler: `join(..)` yields a [`JoinClauseStart`] (only `on` is
//! available), `on(..)` yields a [`JoinComparison`] (only comparisons), and a
//! comparison yields a [`JoinClauseBuilder`], the only state from which the
//! next join or a terminal operation is reachable. The pending join entry is
//! appended to the statement's from-clause when the machine finalizes, never
//! before.

use std::fmt;
use std::marker::PhantomData;

use crate::catalog::column::ColumnRef;
use crate::catalog::row::SqlValue;
use crate::executor::SqlExecutor;

use super::alias::{Alias, AliasInfo};
use super::errors::{QueryBuildError, QueryError};
use super::from::{Comparison, ComparisonTerm, JoinCondition, JoinEntry, JoinType, Operand};
use super::select::Select;
use super::tuple::{RowTuple, TupleAppend};
use super::RenderedSelect;

/// A join whose on-condition has not been started.
pub struct JoinClauseStart<T: RowTuple> {
    select: Select<T>,
    join_type: JoinType,
    join_alias: AliasInfo,
}

impl<T: RowTuple> fmt::Debug for JoinClauseStart<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinClauseStart")
            .field("join_type", &self.join_type)
            .field("join_alias", &self.join_alias)
            .finish()
    }
}

impl<T: RowTuple> JoinClauseStart<T> {
    pub(crate) fn new(select: Select<T>, join_type: JoinType, join_alias: AliasInfo) -> Self {
        Self {
            select,
            join_type,
            join_alias,
        }
    }

    /// Left-hand side by type-based inference against the whole scope.
    pub fn on<R: 'static, V>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinComparison<T, V>, QueryBuildError> {
        let lhs = Operand::Column(self.select.scope().resolve(column)?);
        Ok(self.with_lhs(lhs))
    }

    /// Left-hand side resolved directly against a hinted alias.
    pub fn on_alias<R: 'static, V>(
        self,
        alias: &Alias<R>,
        column: ColumnRef<R, V>,
    ) -> Result<JoinComparison<T, V>, QueryBuildError> {
        let lhs = Operand::Column(self.select.scope().resolve_hinted(alias.name(), column)?);
        Ok(self.with_lhs(lhs))
    }

    /// Left-hand side resolved against an alias named by string.
    pub fn on_named<R: 'static, V>(
        self,
        alias_name: &str,
        column: ColumnRef<R, V>,
    ) -> Result<JoinComparison<T, V>, QueryBuildError> {
        let lhs = Operand::Column(self.select.scope().resolve_hinted(alias_name, column)?);
        Ok(self.with_lhs(lhs))
    }

    fn with_lhs<V>(self, lhs: Operand) -> JoinComparison<T, V> {
        JoinComparison {
            select: self.select,
            join_type: self.join_type,
            join_alias: self.join_alias,
            terms: Vec::new(),
            lhs,
            _value: PhantomData,
        }
    }
}

/// A join with a left-hand side awaiting its comparison.
///
/// `V` is the value type of the pending left-hand column, so both sides of a
/// comparison must agree at compile time.
pub struct JoinComparison<T: RowTuple, V> {
    select: Select<T>,
    join_type: JoinType,
    join_alias: AliasInfo,
    terms: Vec<ComparisonTerm>,
    lhs: Operand,
    _value: PhantomData<fn() -> V>,
}

impl<T: RowTuple, V> fmt::Debug for JoinComparison<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinComparison")
            .field("join_type", &self.join_type)
            .field("join_alias", &self.join_alias)
            .field("terms", &self.terms)
            .field("lhs", &self.lhs)
            .finish()
    }
}

impl<T: RowTuple, V> JoinComparison<T, V> {
    fn rhs_column<R: 'static>(&self, column: ColumnRef<R, V>) -> Result<Operand, QueryBuildError> {
        Ok(Operand::Column(self.select.scope().resolve(column)?))
    }

    fn complete(self, op: Comparison, rhs: Operand) -> JoinClauseBuilder<T> {
        let mut terms = self.terms;
        terms.push(ComparisonTerm {
            lhs: self.lhs,
            op,
            rhs,
        });
        JoinClauseBuilder {
            select: self.select,
            join_type: self.join_type,
            join_alias: self.join_alias,
            terms,
        }
    }

    pub fn is_equal_to<R: 'static>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinClauseBuilder<T>, QueryBuildError> {
        let rhs = self.rhs_column(column)?;
        Ok(self.complete(Comparison::Eq, rhs))
    }

    /// Right-hand side resolved directly against a hinted alias.
    pub fn is_equal_to_alias<R: 'static>(
        self,
        alias: &Alias<R>,
        column: ColumnRef<R, V>,
    ) -> Result<JoinClauseBuilder<T>, QueryBuildError> {
        let rhs = Operand::Column(self.select.scope().resolve_hinted(alias.name(), column)?);
        Ok(self.complete(Comparison::Eq, rhs))
    }

    pub fn is_not_equal_to<R: 'static>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinClauseBuilder<T>, QueryBuildError> {
        let rhs = self.rhs_column(column)?;
        Ok(self.complete(Comparison::Ne, rhs))
    }

    pub fn is_less_than<R: 'static>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinClauseBuilder<T>, QueryBuildError> {
        let rhs = self.rhs_column(column)?;
        Ok(self.complete(Comparison::Lt, rhs))
    }

    pub fn is_less_than_or_equal_to<R: 'static>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinClauseBuilder<T>, QueryBuildError> {
        let rhs = self.rhs_column(column)?;
        Ok(self.complete(Comparison::Le, rhs))
    }

    pub fn is_greater_than<R: 'static>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinClauseBuilder<T>, QueryBuildError> {
        let rhs = self.rhs_column(column)?;
        Ok(self.complete(Comparison::Gt, rhs))
    }

    pub fn is_greater_than_or_equal_to<R: 'static>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinClauseBuilder<T>, QueryBuildError> {
        let rhs = self.rhs_column(column)?;
        Ok(self.complete(Comparison::Ge, rhs))
    }
}

impl<T: RowTuple, V: Into<SqlValue>> JoinComparison<T, V> {
    /// Bind a literal right-hand side as a positional argument.
    pub fn is_equal_to_value(self, value: V) -> JoinClauseBuilder<T> {
        let rhs = Operand::Literal(value.into());
        self.complete(Comparison::Eq, rhs)
    }

    pub fn is_not_equal_to_value(self, value: V) -> JoinClauseBuilder<T> {
        let rhs = Operand::Literal(value.into());
        self.complete(Comparison::Ne, rhs)
    }

    pub fn is_less_than_value(self, value: V) -> JoinClauseBuilder<T> {
        let rhs = Operand::Literal(value.into());
        self.complete(Comparison::Lt, rhs)
    }

    pub fn is_less_than_or_equal_to_value(self, value: V) -> JoinClauseBuilder<T> {
        let rhs = Operand::Literal(value.into());
        self.complete(Comparison::Le, rhs)
    }

    pub fn is_greater_than_value(self, value: V) -> JoinClauseBuilder<T> {
        let rhs = Operand::Literal(value.into());
        self.complete(Comparison::Gt, rhs)
    }

    pub fn is_greater_than_or_equal_to_value(self, value: V) -> JoinClauseBuilder<T> {
        let rhs = Operand::Literal(value.into());
        self.complete(Comparison::Ge, rhs)
    }
}

/// A join whose condition is complete. From here the caller may conjoin
/// another term, chain the next join, or terminate the statement.
pub struct JoinClauseBuilder<T: RowTuple> {
    select: Select<T>,
    join_type: JoinType,
    join_alias: AliasInfo,
    terms: Vec<ComparisonTerm>,
}

impl<T: RowTuple> JoinClauseBuilder<T> {
    /// Conjoin a further comparison to this join's on-condition.
    pub fn and<R: 'static, V>(
        self,
        column: ColumnRef<R, V>,
    ) -> Result<JoinComparison<T, V>, QueryBuildError> {
        let lhs = Operand::Column(self.select.scope().resolve(column)?);
        Ok(self.with_lhs(lhs))
    }

    pub fn and_alias<R: 'static, V>(
        self,
        alias: &Alias<R>,
        column: ColumnRef<R, V>,
    ) -> Result<JoinComparison<T, V>, QueryBuildError> {
        let lhs = Operand::Column(self.select.scope().resolve_hinted(alias.name(), column)?);
        Ok(self.with_lhs(lhs))
    }

    fn with_lhs<V>(self, lhs: Operand) -> JoinComparison<T, V> {
        JoinComparison {
            select: self.select,
            join_type: self.join_type,
            join_alias: self.join_alias,
            terms: self.terms,
            lhs,
            _value: PhantomData,
        }
    }

    /// The completed statement value, with this join's entry appended.
    pub fn finish(&self) -> Select<T> {
        self.select.with_join(JoinEntry {
            join_type: self.join_type,
            alias: self.join_alias.clone(),
            on: JoinCondition {
                terms: self.terms.clone(),
            },
        })
    }

    pub fn join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().join(alias)
    }

    pub fn join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().join_table::<R>(alias_name)
    }

    pub fn left_join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().left_join(alias)
    }

    pub fn left_join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().left_join_table::<R>(alias_name)
    }

    pub fn right_join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().right_join(alias)
    }

    pub fn right_join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().right_join_table::<R>(alias_name)
    }

    pub fn full_outer_join<R: 'static>(
        &self,
        alias: Alias<R>,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().full_outer_join(alias)
    }

    pub fn full_outer_join_table<R: 'static>(
        &self,
        alias_name: &str,
    ) -> Result<JoinClauseStart<T::Appended>, QueryBuildError>
    where
        T: TupleAppend<R>,
    {
        self.finish().full_outer_join_table::<R>(alias_name)
    }

    pub fn render(&self) -> Result<RenderedSelect, QueryBuildError> {
        self.finish().render()
    }

    pub fn optional<E: SqlExecutor + ?Sized>(&self, executor: &E) -> Result<Option<T>, QueryError> {
        self.finish().optional(executor)
    }

    pub fn single<E: SqlExecutor + ?Sized>(&self, executor: &E) -> Result<T, QueryError> {
        self.finish().single(executor)
    }

    pub fn list<E: SqlExecutor + ?Sized>(&self, executor: &E) -> Result<Vec<T>, QueryError> {
        self.finish().list(executor)
    }
}
