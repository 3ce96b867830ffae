//! Ordered output expressions of a statement.
//!
//! A projection is positional: its order fixes both the select-list order and
//! the extraction order of the composed row mapper, so concatenation order is
//! semantically significant.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::alias::{Alias, AliasInfo};
use super::errors::QueryBuildError;
use super::ToSql;
use crate::catalog::column::ColumnRef;

/// One rendered select-list column: `<fragment> as <label>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectColumn {
    pub fragment: String,
    pub label: String,
}

impl ToSql for SelectColumn {
    fn to_sql(&self) -> String {
        format!("{} as {}", self.fragment, self.label)
    }
}

#[derive(Debug, Clone)]
enum ProjectionItem {
    /// All columns of one alias, expanded in catalog declaration order with
    /// labels `<alias>_<COLUMN>`.
    WholeAlias(AliasInfo),
    /// A single expression with an explicit output label.
    Expression { fragment: String, label: String },
}

/// An ordered, concatenable sequence of output expressions.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    items: Vec<ProjectionItem>,
}

impl Projection {
    /// Concatenate projections in call order.
    pub fn of(parts: impl IntoIterator<Item = Projection>) -> Projection {
        let mut items = Vec::new();
        for part in parts {
            items.extend(part.items);
        }
        Projection { items }
    }

    /// Every column of `alias`, auto-prefixed to avoid label collisions.
    pub fn whole_alias<R: 'static>(alias: &Alias<R>) -> Projection {
        Projection {
            items: vec![ProjectionItem::WholeAlias(alias.info().clone())],
        }
    }

    /// A single column of `alias` under its canonical `<alias>_<COLUMN>`
    /// label.
    pub fn column<R: 'static, T>(
        alias: &Alias<R>,
        column: ColumnRef<R, T>,
    ) -> Result<Projection, QueryBuildError> {
        let fragment = alias.column(column)?;
        Ok(Projection {
            items: vec![ProjectionItem::Expression {
                fragment,
                label: format!("{}_{}", alias.name(), column.name()),
            }],
        })
    }

    pub(crate) fn plus_whole_alias(&self, info: AliasInfo) -> Projection {
        let mut extended = self.clone();
        extended.items.push(ProjectionItem::WholeAlias(info));
        extended
    }

    /// Expand to the ordered select-list, enforcing label uniqueness.
    pub fn render(&self) -> Result<Vec<SelectColumn>, QueryBuildError> {
        let mut columns = Vec::new();
        for item in &self.items {
            match item {
                ProjectionItem::WholeAlias(info) => {
                    for col in info.columns.iter() {
                        columns.push(SelectColumn {
                            fragment: format!("{}.{}", info.name, col.name),
                            label: format!("{}_{}", info.name, col.name),
                        });
                    }
                }
                ProjectionItem::Expression { fragment, label } => {
                    columns.push(SelectColumn {
                        fragment: fragment.clone(),
                        label: label.clone(),
                    });
                }
            }
        }
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.label.as_str()) {
                return Err(QueryBuildError::DuplicateProjectionLabel {
                    label: col.label.clone(),
                });
            }
        }
        Ok(columns)
    }
}
