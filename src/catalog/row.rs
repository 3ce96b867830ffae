//! Physical result rows and typed value extraction.
//!
//! An executor hands rows back as label/value pairs ([`ResultRow`]); the
//! per-alias extractors read them through a [`RowReader`], which scopes every
//! lookup to the alias's disambiguated labels (`<alias>_<COLUMN>`).

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::errors::RowError;

/// A bound argument or result-cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Boolean(_) => "boolean",
            SqlValue::Integer(_) => "integer",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::Date(_) => "date",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Boolean(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl<V: Into<SqlValue>> From<Option<V>> for SqlValue {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// Conversion from a result cell into a Rust value.
pub trait FromSql: Sized {
    /// Attempt the conversion; `None` means the cell's type does not fit.
    fn from_sql(value: &SqlValue) -> Option<Self>;

    /// Human-readable name of the expected type, used in mismatch errors.
    fn expected() -> &'static str;
}

impl FromSql for bool {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn expected() -> &'static str {
        "boolean"
    }
}

impl FromSql for i64 {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn expected() -> &'static str {
        "integer"
    }
}

impl FromSql for i32 {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Integer(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }

    fn expected() -> &'static str {
        "integer"
    }
}

impl FromSql for f64 {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Float(f) => Some(*f),
            SqlValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn expected() -> &'static str {
        "float"
    }
}

impl FromSql for String {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn expected() -> &'static str {
        "text"
    }
}

impl FromSql for NaiveDate {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    fn expected() -> &'static str {
        "date"
    }
}

impl FromSql for NaiveDateTime {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    fn expected() -> &'static str {
        "timestamp"
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Null => Some(None),
            other => T::from_sql(other).map(Some),
        }
    }

    fn expected() -> &'static str {
        T::expected()
    }
}

/// One physical result row, keyed by output label in select order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    columns: Vec<(String, SqlValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, label: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push((label.into(), value.into()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }
}

/// A prefix-scoped view over one [`ResultRow`].
///
/// With prefix `p`, `get("ID")` reads the cell labelled `p_ID`; with no
/// prefix it reads the bare column label.
pub struct RowReader<'a> {
    row: &'a ResultRow,
    prefix: Option<&'a str>,
}

impl<'a> RowReader<'a> {
    pub fn new(row: &'a ResultRow) -> Self {
        Self { row, prefix: None }
    }

    pub fn with_prefix(row: &'a ResultRow, prefix: &'a str) -> Self {
        Self {
            row,
            prefix: Some(prefix),
        }
    }

    pub fn get<T: FromSql>(&self, column: &str) -> Result<T, RowError> {
        let label = match self.prefix {
            Some(prefix) => format!("{}_{}", prefix, column),
            None => column.to_string(),
        };
        let value = self
            .row
            .get(&label)
            .ok_or_else(|| RowError::MissingColumn {
                label: label.clone(),
            })?;
        T::from_sql(value).ok_or_else(|| RowError::TypeMismatch {
            label,
            expected: T::expected(),
            actual: value.type_name().to_string(),
        })
    }
}

/// A composed mapper from one physical row to a typed value.
///
/// Mappers are pure and shareable; composing a larger tuple mapper out of
/// per-alias extractors wraps them in a new closure, never mutates.
pub type RowMapper<T> = Arc<dyn Fn(&ResultRow) -> Result<T, RowError> + Send + Sync>;
