//! Composed row mapping, terminal-operation shapes and insert rendering.

use sqlect::catalog::{ResultRow, RowError, SqlValue};
use sqlect::executor::ExecutorError;
use sqlect::query::QueryError;

use crate::fixtures::{self, Child, Grandchild, Parent, RecordingExecutor};

fn family_row(parent_id: i64, alias_id: Option<i64>) -> ResultRow {
    ResultRow::new()
        .with("p_ID", parent_id)
        .with("c_PARENT_ID", parent_id)
        .with("c_ALIAS_ID", alias_id)
}

#[test]
fn joined_rows_map_to_tuples_in_join_order() -> anyhow::Result<()> {
    fixtures::init_logging();
    let db = fixtures::test_database();
    let executor =
        RecordingExecutor::with_rows(vec![family_row(1, Some(7)), family_row(2, None)]);

    let rows = db
        .from_table::<Parent>("p")?
        .join_table::<Child>("c")?
        .on(Parent::ID)?
        .is_equal_to(Child::PARENT_ID)?
        .list(&executor)?;

    assert_eq!(
        rows,
        vec![
            (
                Parent { id: 1 },
                Child {
                    parent_id: 1,
                    alias_id: Some(7),
                }
            ),
            (
                Parent { id: 2 },
                Child {
                    parent_id: 2,
                    alias_id: None,
                }
            ),
        ]
    );
    Ok(())
}

#[test]
fn three_table_tuple_extracts_every_alias_from_one_row() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let row = family_row(1, Some(7))
        .with("g_CHILD_ALIAS", 7i64)
        .with("g_LABEL", "heirloom");
    let executor = RecordingExecutor::with_rows(vec![row]);

    let (parent, child, grandchild) = db
        .from_table::<Parent>("p")?
        .join_table::<Child>("c")?
        .on(Parent::ID)?
        .is_equal_to(Child::PARENT_ID)?
        .join_table::<Grandchild>("g")?
        .on(Child::ALIAS_ID)?
        .is_equal_to(Grandchild::CHILD_ALIAS)?
        .single(&executor)?;

    assert_eq!(parent, Parent { id: 1 });
    assert_eq!(child.alias_id, Some(7));
    assert_eq!(
        grandchild,
        Grandchild {
            child_alias: 7,
            label: "heirloom".to_string(),
        }
    );
    Ok(())
}

#[test]
fn optional_rejects_more_than_one_row() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let executor =
        RecordingExecutor::with_rows(vec![family_row(1, None), family_row(2, None)]);

    let err = db
        .from_table::<Parent>("p")?
        .join_table::<Child>("c")?
        .on(Parent::ID)?
        .is_equal_to(Child::PARENT_ID)?
        .optional(&executor)
        .unwrap_err();

    assert!(matches!(err, QueryError::TooManyRows { got: 2 }));
    Ok(())
}

#[test]
fn single_requires_a_row() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let executor = RecordingExecutor::new();

    let err = db.from_table::<Parent>("p")?.single(&executor).unwrap_err();
    assert!(matches!(err, QueryError::NoRows));
    Ok(())
}

#[test]
fn extraction_failures_surface_with_the_offending_label() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let bad_row = ResultRow::new()
        .with("p_ID", "one") // text where an integer is declared
        .with("c_PARENT_ID", 1i64)
        .with("c_ALIAS_ID", SqlValue::Null);
    let executor = RecordingExecutor::with_rows(vec![bad_row]);

    let err = db
        .from_table::<Parent>("p")?
        .join_table::<Child>("c")?
        .on(Parent::ID)?
        .is_equal_to(Child::PARENT_ID)?
        .list(&executor)
        .unwrap_err();

    match err {
        QueryError::Execute(ExecutorError::Row(RowError::TypeMismatch { label, .. })) => {
            assert_eq!(label, "p_ID");
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }
    Ok(())
}

#[test]
fn insert_renders_columns_and_binds_getters_in_declaration_order() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let executor = RecordingExecutor::new();

    let updated = db.table::<Child>()?.insert(
        &executor,
        &Child {
            parent_id: 4,
            alias_id: None,
        },
    )?;

    assert_eq!(updated, 1);
    let call = executor.only_call();
    assert_eq!(
        call.sql,
        "insert into TEST.CHILD (PARENT_ID, ALIAS_ID) values (?, ?)"
    );
    assert_eq!(call.args, vec![SqlValue::Integer(4), SqlValue::Null]);
    Ok(())
}

#[test]
fn statement_and_mapper_stay_aligned_for_reuse() -> anyhow::Result<()> {
    // The same completed builder can render and execute repeatedly with
    // identical output (determinism across invocations).
    let db = fixtures::test_database();
    let executor = RecordingExecutor::with_rows(vec![family_row(1, Some(2))]);

    let select = db
        .from_table::<Parent>("p")?
        .join_table::<Child>("c")?
        .on(Parent::ID)?
        .is_equal_to(Child::PARENT_ID)?
        .finish();

    let first = select.render()?;
    let second = select.render()?;
    assert_eq!(first, second);

    select.list(&executor)?;
    select.list(&executor)?;
    let calls = executor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    Ok(())
}
