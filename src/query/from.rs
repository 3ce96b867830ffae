//! The accumulated source of a statement: a base alias plus its joins.
//!
//! A `FromClause` only ever holds *complete* join entries: the join-clause
//! state machine appends an entry when (and only when) its on-condition has
//! at least one finished comparison, so no renderable statement exists
//! mid-join. The renderer still refuses an empty condition at the boundary.

use serde::{Deserialize, Serialize};

use crate::catalog::row::SqlValue;

use super::alias::AliasInfo;
use super::errors::QueryBuildError;
use super::ToSql;

/// Join flavour, with the exact keyword mapping of the rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

impl ToSql for JoinType {
    fn to_sql(&self) -> String {
        match self {
            JoinType::Inner => "join",
            JoinType::LeftOuter => "left join",
            JoinType::RightOuter => "right join",
            JoinType::FullOuter => "full outer join",
        }
        .to_string()
    }
}

/// Comparison operator of one on-condition term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ToSql for Comparison {
    fn to_sql(&self) -> String {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
        }
        .to_string()
    }
}

/// One side of a comparison: a resolved qualified column, or a literal bound
/// as a positional argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Column(String),
    Literal(SqlValue),
}

impl Operand {
    fn render_into(&self, sql: &mut String, args: &mut Vec<SqlValue>) {
        match self {
            Operand::Column(qualified) => sql.push_str(qualified),
            Operand::Literal(value) => {
                sql.push('?');
                args.push(value.clone());
            }
        }
    }
}

/// `left <op> right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTerm {
    pub lhs: Operand,
    pub op: Comparison,
    pub rhs: Operand,
}

impl ComparisonTerm {
    fn render_into(&self, sql: &mut String, args: &mut Vec<SqlValue>) {
        self.lhs.render_into(sql, args);
        sql.push(' ');
        sql.push_str(&self.op.to_sql());
        sql.push(' ');
        self.rhs.render_into(sql, args);
    }
}

/// Conjunction of comparison terms forming one join's on-condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinCondition {
    pub terms: Vec<ComparisonTerm>,
}

/// One completed join entry.
#[derive(Debug, Clone)]
pub(crate) struct JoinEntry {
    pub(crate) join_type: JoinType,
    pub(crate) alias: AliasInfo,
    pub(crate) on: JoinCondition,
}

/// Base alias plus joins, in join-call order.
#[derive(Debug, Clone)]
pub(crate) struct FromClause {
    pub(crate) base: AliasInfo,
    pub(crate) joins: Vec<JoinEntry>,
}

impl FromClause {
    pub(crate) fn new(base: AliasInfo) -> Self {
        Self {
            base,
            joins: Vec::new(),
        }
    }

    pub(crate) fn with_join(&self, entry: JoinEntry) -> FromClause {
        let mut extended = self.clone();
        extended.joins.push(entry);
        extended
    }

    pub(crate) fn render_into(
        &self,
        sql: &mut String,
        args: &mut Vec<SqlValue>,
    ) -> Result<(), QueryBuildError> {
        sql.push_str("from ");
        sql.push_str(&self.base.qualified_table);
        sql.push_str(" as ");
        sql.push_str(&self.base.name);
        for join in &self.joins {
            if join.on.terms.is_empty() {
                return Err(QueryBuildError::IncompleteJoin {
                    alias: join.alias.name.clone(),
                });
            }
            sql.push(' ');
            sql.push_str(&join.join_type.to_sql());
            sql.push(' ');
            sql.push_str(&join.alias.qualified_table);
            sql.push_str(" as ");
            sql.push_str(&join.alias.name);
            sql.push_str(" on ");
            for (i, term) in join.on.terms.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" and ");
                }
                term.render_into(sql, args);
            }
        }
        Ok(())
    }
}
