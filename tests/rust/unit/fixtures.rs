//! Shared test tables and a recording executor.
//!
//! The table family mirrors a small parent/child hierarchy:
//! `PARENT(ID)`, `CHILD(PARENT_ID, ALIAS_ID)`, `GRANDCHILD(CHILD_ALIAS,
//! LABEL)`, `KEEPSAKE(GRANDCHILD_LABEL, WORTH)`, all under schema `TEST`.

use std::sync::Mutex;

use sqlect::catalog::{ColumnRef, DataType, Database, ResultRow, RowMapper, RowReader, SqlValue, TableSchema};
use sqlect::executor::{map_rows, ExecutorError, SqlExecutor};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parent {
    pub id: i64,
}

impl Parent {
    pub const ID: ColumnRef<Parent, i64> = ColumnRef::new("ID");
}

#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub parent_id: i64,
    pub alias_id: Option<i64>,
}

impl Child {
    pub const PARENT_ID: ColumnRef<Child, i64> = ColumnRef::new("PARENT_ID");
    pub const ALIAS_ID: ColumnRef<Child, i64> = ColumnRef::new("ALIAS_ID");
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grandchild {
    pub child_alias: i64,
    pub label: String,
}

impl Grandchild {
    pub const CHILD_ALIAS: ColumnRef<Grandchild, i64> = ColumnRef::new("CHILD_ALIAS");
    pub const LABEL: ColumnRef<Grandchild, String> = ColumnRef::new("LABEL");
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keepsake {
    pub grandchild_label: String,
    pub worth: f64,
}

impl Keepsake {
    pub const GRANDCHILD_LABEL: ColumnRef<Keepsake, String> = ColumnRef::new("GRANDCHILD_LABEL");
    pub const WORTH: ColumnRef<Keepsake, f64> = ColumnRef::new("WORTH");
}

pub fn test_database() -> Database {
    Database::builder()
        .default_schema("TEST")
        .table(
            TableSchema::<Parent>::builder("PARENT")
                .column("ID", DataType::Integer, |p: &Parent| p.id.into())
                .build(|r: &RowReader| Ok(Parent { id: r.get("ID")? }))
                .expect("parent schema"),
        )
        .table(
            TableSchema::<Child>::builder("CHILD")
                .column("PARENT_ID", DataType::Integer, |c: &Child| {
                    c.parent_id.into()
                })
                .nullable_column("ALIAS_ID", DataType::Integer, |c: &Child| {
                    c.alias_id.into()
                })
                .build(|r: &RowReader| {
                    Ok(Child {
                        parent_id: r.get("PARENT_ID")?,
                        alias_id: r.get("ALIAS_ID")?,
                    })
                })
                .expect("child schema"),
        )
        .table(
            TableSchema::<Grandchild>::builder("GRANDCHILD")
                .column("CHILD_ALIAS", DataType::Integer, |g: &Grandchild| {
                    g.child_alias.into()
                })
                .column("LABEL", DataType::Text, |g: &Grandchild| g.label.clone().into())
                .build(|r: &RowReader| {
                    Ok(Grandchild {
                        child_alias: r.get("CHILD_ALIAS")?,
                        label: r.get("LABEL")?,
                    })
                })
                .expect("grandchild schema"),
        )
        .table(
            TableSchema::<Keepsake>::builder("KEEPSAKE")
                .column("GRANDCHILD_LABEL", DataType::Text, |k: &Keepsake| {
                    k.grandchild_label.clone().into()
                })
                .column("WORTH", DataType::Float, |k: &Keepsake| k.worth.into())
                .build(|r: &RowReader| {
                    Ok(Keepsake {
                        grandchild_label: r.get("GRANDCHILD_LABEL")?,
                        worth: r.get("WORTH")?,
                    })
                })
                .expect("keepsake schema"),
        )
        .build()
        .expect("test database")
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

/// Captures every statement it is handed and serves canned rows back: the
/// captor-mock seam the builder's terminal operations are tested through.
pub struct RecordingExecutor {
    rows: Vec<ResultRow>,
    update_count: u64,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<ResultRow>) -> Self {
        Self {
            rows,
            update_count: 1,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one executor call");
        calls.into_iter().next().unwrap()
    }

    fn record(&self, sql: &str, args: &[SqlValue]) {
        self.calls.lock().unwrap().push(RecordedCall {
            sql: sql.to_string(),
            args: args.to_vec(),
        });
    }
}

impl SqlExecutor for RecordingExecutor {
    fn query<T>(
        &self,
        sql: &str,
        args: &[SqlValue],
        mapper: RowMapper<T>,
    ) -> Result<Vec<T>, ExecutorError> {
        self.record(sql, args);
        map_rows(&self.rows, &mapper)
    }

    fn execute(&self, sql: &str, args: &[SqlValue]) -> Result<u64, ExecutorError> {
        self.record(sql, args);
        Ok(self.update_count)
    }
}
