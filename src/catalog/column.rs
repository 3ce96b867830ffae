use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// SQL datatype of a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Integer,
    Float,
    Text,
    Date,
    Timestamp,
}

/// Declared metadata for one column of a table: name, datatype and
/// nullability, in catalog declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

/// A typed handle to one column of row type `R` with value type `T`.
///
/// Column handles are declared by the caller as associated consts on the row
/// type, which is what ties a column reference to its owning table at compile
/// time:
///
/// ```
/// use sqlect::catalog::ColumnRef;
///
/// struct Parent { id: i64 }
///
/// impl Parent {
///     const ID: ColumnRef<Parent, i64> = ColumnRef::new("ID");
/// }
/// ```
///
/// For nullable columns `T` is the unwrapped value type (the type the column
/// compares as), not `Option<T>`; nullability is carried by the [`ColumnDef`]
/// and by the row struct's own field.
pub struct ColumnRef<R, T> {
    name: &'static str,
    _marker: PhantomData<fn(&R) -> T>,
}

impl<R, T> ColumnRef<R, T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

// Manual impls: the derives would demand `R: Clone` etc., which the phantom
// marker never requires.
impl<R, T> Clone for ColumnRef<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for ColumnRef<R, T> {}

impl<R, T> fmt::Debug for ColumnRef<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnRef").field("name", &self.name).finish()
    }
}
