//! Error taxonomy at statement-construction time: every defect surfaces at
//! the call that introduces it, before any SQL exists.

use sqlect::catalog::ColumnRef;
use sqlect::query::QueryBuildError;
use sqlect::Scope;

use crate::fixtures::{self, Child, Parent};

#[test]
fn joining_a_taken_alias_name_is_rejected() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let p = db.alias::<Parent>("p")?;
    let shadow = db.alias::<Child>("p")?;

    let err = db.from(p).join(shadow).unwrap_err();
    assert_eq!(
        err,
        QueryBuildError::DuplicateAlias {
            name: "p".to_string()
        }
    );
    Ok(())
}

#[test]
fn unqualified_reference_across_two_aliases_of_one_table_is_ambiguous() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let p = db.alias::<Parent>("p")?;

    let err = db
        .from(p)
        .join_table::<Child>("c1")?
        .on(Parent::ID)?
        .is_equal_to(Child::PARENT_ID)?
        .join_table::<Child>("c2")?
        .on(Child::PARENT_ID)
        .unwrap_err();

    assert_eq!(
        err,
        QueryBuildError::AmbiguousColumn {
            column: "PARENT_ID".to_string(),
            matches: vec!["c1".to_string(), "c2".to_string()],
        }
    );
    Ok(())
}

#[test]
fn hint_naming_an_absent_alias_is_rejected() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let p = db.alias::<Parent>("p")?;
    let c = db.alias::<Child>("c")?;

    let err = db
        .from(p)
        .join(c)?
        .on_named("x", Child::PARENT_ID)
        .unwrap_err();
    assert_eq!(
        err,
        QueryBuildError::UnknownAlias {
            name: "x".to_string()
        }
    );
    Ok(())
}

#[test]
fn undeclared_column_reference_is_rejected() -> anyhow::Result<()> {
    const BOGUS: ColumnRef<Child, i64> = ColumnRef::new("NO_SUCH_COLUMN");

    let db = fixtures::test_database();
    let p = db.alias::<Parent>("p")?;
    let c = db.alias::<Child>("c")?;

    let err = db.from(p).join(c)?.on(BOGUS).unwrap_err();
    assert!(matches!(err, QueryBuildError::UnknownColumn { .. }));
    Ok(())
}

#[test]
fn hint_against_the_wrong_table_is_an_unknown_column() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let p = db.alias::<Parent>("p")?;
    let c = db.alias::<Child>("c")?;

    // "p" is in scope, but it is not a CHILD alias.
    let err = db
        .from(p)
        .join(c)?
        .on_named("p", Child::PARENT_ID)
        .unwrap_err();
    assert!(matches!(err, QueryBuildError::UnknownColumn { .. }));
    Ok(())
}

#[test]
fn nested_scope_resolves_outer_aliases_and_rejects_their_names() -> anyhow::Result<()> {
    let db = fixtures::test_database();
    let p = db.alias::<Parent>("p")?;
    let outer = db.from(p);

    let inner = outer.scope().nest();
    assert_eq!(inner.resolve(Parent::ID)?, "p.ID");

    let shadow = db.alias::<Parent>("p")?;
    assert_eq!(
        inner.plus(&shadow).unwrap_err(),
        QueryBuildError::DuplicateAlias {
            name: "p".to_string()
        }
    );

    // An unrelated name extends the child scope without touching the outer one.
    let sibling: Scope = inner.plus(&db.alias::<Child>("c")?)?;
    assert_eq!(sibling.resolve(Child::PARENT_ID)?, "c.PARENT_ID");
    assert!(outer.scope().resolve(Child::PARENT_ID).is_err());
    Ok(())
}

#[test]
fn malformed_alias_names_are_rejected_at_binding() {
    let db = fixtures::test_database();
    for bad in ["", "9lives", "a b", "p.x"] {
        assert!(matches!(
            db.alias::<Parent>(bad),
            Err(QueryBuildError::InvalidAliasName { .. })
        ));
    }
}
