//! Static schema configuration.
//!
//! The catalog is explicit configuration, not reflection: the caller declares
//! each table once (schema name, table name, ordered columns with datatype,
//! nullability and a getter, and a row-build function) and registers it with
//! a [`Database`]. Everything downstream (alias binding, column resolution,
//! projection expansion, row extraction) reads this declared metadata.

pub mod column;
pub mod errors;
pub mod row;

pub use column::{ColumnDef, ColumnRef, DataType};
pub use errors::{CatalogError, RowError};
pub use row::{FromSql, ResultRow, RowMapper, RowReader, SqlValue};

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::executor::{ExecutorError, SqlExecutor};

/// One declared column together with its value getter.
struct TableColumn<R> {
    def: ColumnDef,
    get: fn(&R) -> SqlValue,
}

/// Declared description of one table for row type `R`.
///
/// Immutable once built. The schema name may be left unset and filled in
/// from the database's default schema at registration time.
pub struct TableSchema<R> {
    schema: Option<String>,
    table_name: String,
    columns: Vec<TableColumn<R>>,
    column_defs: Arc<[ColumnDef]>,
    build_row: fn(&RowReader<'_>) -> Result<R, RowError>,
}

impl<R> TableSchema<R> {
    pub fn builder(table_name: &str) -> TableSchemaBuilder<R> {
        TableSchemaBuilder {
            schema: None,
            table_name: table_name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// `<schema>.<table>`, or the bare table name when no schema applies.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.table_name),
            None => self.table_name.clone(),
        }
    }

    /// Declared columns in declaration order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.column_defs
    }

    pub(crate) fn column_defs(&self) -> Arc<[ColumnDef]> {
        Arc::clone(&self.column_defs)
    }

    /// Row extractor reading this table's columns, optionally under an alias
    /// prefix (labels `<prefix>_<COLUMN>`).
    pub fn row_mapper(self: Arc<Self>, prefix: Option<&str>) -> RowMapper<R>
    where
        R: 'static,
    {
        let prefix = prefix.map(str::to_string);
        Arc::new(move |result_row| {
            let reader = match prefix.as_deref() {
                Some(p) => RowReader::with_prefix(result_row, p),
                None => RowReader::new(result_row),
            };
            (self.build_row)(&reader)
        })
    }

    /// Render and execute `insert into <table> (<cols>) values (?, …)` with
    /// arguments taken from the column getters in declaration order.
    pub fn insert<E: SqlExecutor + ?Sized>(
        &self,
        executor: &E,
        row: &R,
    ) -> Result<u64, ExecutorError> {
        let names: Vec<&str> = self.columns.iter().map(|c| c.def.name.as_str()).collect();
        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "insert into {} ({}) values ({})",
            self.qualified_name(),
            names.join(", "),
            placeholders
        );
        let args: Vec<SqlValue> = self.columns.iter().map(|c| (c.get)(row)).collect();
        log::debug!("rendered insert: {}", sql);
        executor.execute(&sql, &args)
    }
}

impl<R> fmt::Debug for TableSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSchema")
            .field("qualified_name", &self.qualified_name())
            .field("columns", &self.column_defs.len())
            .finish()
    }
}

/// Builder for a [`TableSchema`]. Columns are declared in the order they are
/// projected and extracted.
pub struct TableSchemaBuilder<R> {
    schema: Option<String>,
    table_name: String,
    columns: Vec<TableColumn<R>>,
}

impl<R> TableSchemaBuilder<R> {
    /// Explicit schema name; overrides the database default.
    pub fn schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    pub fn column(self, name: &str, data_type: DataType, get: fn(&R) -> SqlValue) -> Self {
        self.push(name, data_type, false, get)
    }

    pub fn nullable_column(self, name: &str, data_type: DataType, get: fn(&R) -> SqlValue) -> Self {
        self.push(name, data_type, true, get)
    }

    fn push(mut self, name: &str, data_type: DataType, nullable: bool, get: fn(&R) -> SqlValue) -> Self {
        self.columns.push(TableColumn {
            def: ColumnDef {
                name: name.to_string(),
                data_type,
                nullable,
            },
            get,
        });
        self
    }

    pub fn build(
        self,
        build_row: fn(&RowReader<'_>) -> Result<R, RowError>,
    ) -> Result<TableSchema<R>, CatalogError> {
        for (i, col) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.def.name == col.def.name) {
                return Err(CatalogError::DuplicateColumn {
                    table: self.table_name.clone(),
                    column: col.def.name.clone(),
                });
            }
        }
        let column_defs: Arc<[ColumnDef]> =
            self.columns.iter().map(|c| c.def.clone()).collect::<Vec<_>>().into();
        Ok(TableSchema {
            schema: self.schema,
            table_name: self.table_name,
            columns: self.columns,
            column_defs,
            build_row,
        })
    }
}

type ErasedTable = Arc<dyn Any + Send + Sync>;

struct DatabaseInner {
    default_schema: Option<String>,
    tables: HashMap<TypeId, ErasedTable>,
}

/// The catalog handle: a type-indexed registry of declared tables.
///
/// Cheap to clone and share; immutable once built.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder {
            default_schema: None,
            tables: Vec::new(),
        }
    }

    pub fn default_schema(&self) -> Option<&str> {
        self.inner.default_schema.as_deref()
    }

    /// Look up the declared table for row type `R`.
    pub fn table<R: 'static>(&self) -> Result<Arc<TableSchema<R>>, CatalogError> {
        self.inner
            .tables
            .get(&TypeId::of::<R>())
            .cloned()
            .and_then(|erased| erased.downcast::<TableSchema<R>>().ok())
            .ok_or(CatalogError::UnknownTable {
                row_type: std::any::type_name::<R>(),
            })
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("default_schema", &self.inner.default_schema)
            .field("tables", &self.inner.tables.len())
            .finish()
    }
}

struct PendingTable {
    row_type: TypeId,
    row_type_name: &'static str,
    install: Box<dyn FnOnce(Option<&str>) -> ErasedTable>,
}

/// Builder for a [`Database`].
pub struct DatabaseBuilder {
    default_schema: Option<String>,
    tables: Vec<PendingTable>,
}

impl DatabaseBuilder {
    pub fn default_schema(mut self, schema: &str) -> Self {
        self.default_schema = Some(schema.to_string());
        self
    }

    pub fn table<R: 'static>(mut self, table: TableSchema<R>) -> Self {
        self.tables.push(PendingTable {
            row_type: TypeId::of::<R>(),
            row_type_name: std::any::type_name::<R>(),
            install: Box::new(move |default_schema| {
                let mut table = table;
                if table.schema.is_none() {
                    table.schema = default_schema.map(str::to_string);
                }
                let erased: ErasedTable = Arc::new(table);
                erased
            }),
        });
        self
    }

    pub fn build(self) -> Result<Database, CatalogError> {
        let mut tables: HashMap<TypeId, ErasedTable> = HashMap::new();
        for pending in self.tables {
            if tables.contains_key(&pending.row_type) {
                return Err(CatalogError::DuplicateTable {
                    row_type: pending.row_type_name,
                });
            }
            log::debug!("registering table for row type {}", pending.row_type_name);
            tables.insert(pending.row_type, (pending.install)(self.default_schema.as_deref()));
        }
        Ok(Database {
            inner: Arc::new(DatabaseInner {
                default_schema: self.default_schema,
                tables,
            }),
        })
    }
}
