use super::GenericCrud;
use crate::errors::CrudError;
use crate::executor::MemoryExecutor;
use crate::query::StructuredQuery;
use crate::test_models::{Author, AuthorRelation, User, UserColumn};
use crate::traits::CrudStore;
use std::collections::BTreeMap;
use type_mapping::SqlValue;

fn user(name: &str) -> User {
    User {
        name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_write_omit_always_contains_timestamps() {
    let crud = GenericCrud::<User, _>::with_omit(MemoryExecutor::new(), [UserColumn::Email]);
    let omitted = crud.write_omit(&[UserColumn::Name]);
    let expected = [
        UserColumn::Name,
        UserColumn::Email,
        UserColumn::CreatedAt,
        UserColumn::UpdatedAt,
    ];
    assert_eq!(omitted.len(), expected.len());
    assert!(expected.iter().all(|column| omitted.contains(column)));
}

#[test]
fn test_insert_columns_skip_zero_primary_key() {
    let crud = GenericCrud::<User, _>::new(MemoryExecutor::new());
    let columns = crud.insert_columns(&user("a"), &[]);
    assert_eq!(
        columns,
        vec![
            UserColumn::Name,
            UserColumn::Email,
            UserColumn::Age,
            UserColumn::DeletedAt,
        ]
    );

    let mut keyed = user("a");
    keyed.id = 9;
    assert_eq!(crud.insert_columns(&keyed, &[])[0], UserColumn::Id);
}

#[test]
fn test_update_assignments_skip_zero_key_and_omitted() {
    let crud = GenericCrud::<User, _>::new(MemoryExecutor::new());
    let mut record = user("b");
    record.id = 3;
    record.age = Some(7);

    let assignments = crud.update_assignments(&record, &[UserColumn::Age]);
    assert_eq!(
        assignments,
        vec![(UserColumn::Name, SqlValue::Text("b".to_string()))]
    );
}

#[tokio::test]
async fn test_keyed_writes_require_primary_key() {
    let crud = GenericCrud::<User, _>::new(MemoryExecutor::new());
    let unkeyed = user("a");

    let err = crud.update(&unkeyed, &[]).await.unwrap_err();
    assert!(matches!(
        err,
        CrudError::MissingPrimaryKey {
            operation: "update",
            ..
        }
    ));
    assert!(crud.delete(&unkeyed).await.is_err());
    assert!(crud
        .update_field(&unkeyed, UserColumn::Name, "b".into())
        .await
        .is_err());
}

#[tokio::test]
async fn test_update_field_skips_write_omitted_columns() {
    let crud = GenericCrud::<User, _>::with_omit(MemoryExecutor::new(), [UserColumn::Age]);
    let created = crud.create(user("a"), &[]).await.unwrap();

    let affected = crud
        .update_field(&created, UserColumn::Age, SqlValue::Integer(99))
        .await
        .unwrap();
    assert_eq!(affected, 0);

    let affected = crud
        .update_field(&created, UserColumn::UpdatedAt, SqlValue::Null)
        .await
        .unwrap();
    assert_eq!(affected, 0);

    let stored = crud.get_by_id(created.id).await.unwrap();
    assert_eq!(stored.age, None);
    assert_eq!(stored.updated_at, created.updated_at);

    let affected = crud
        .update_field(&created, UserColumn::Name, "b".into())
        .await
        .unwrap();
    assert_eq!(affected, 1);
}

#[tokio::test]
async fn test_update_map_to_taken_key_is_rejected() {
    let crud = GenericCrud::<User, _>::new(MemoryExecutor::new());
    let first = crud.create(user("a"), &[]).await.unwrap();
    let second = crud.create(user("b"), &[]).await.unwrap();

    let mut map = BTreeMap::new();
    map.insert(UserColumn::Id, SqlValue::BigInt(first.id));
    let err = crud.update_map(&second, &map).await.unwrap_err();
    assert!(matches!(err, CrudError::Execution { operation: "update", .. }));

    assert_eq!(crud.get_by_id(first.id).await.unwrap().name, "a");
    assert_eq!(crud.get_by_id(second.id).await.unwrap().name, "b");
}

#[tokio::test]
async fn test_get_or_create_returns_existing() {
    let crud = GenericCrud::<User, _>::new(MemoryExecutor::new());
    let first = crud.get_or_create(user("a"), &[]).await.unwrap();
    let again = crud.get_or_create(user("a"), &[]).await.unwrap();
    let other = crud.get_or_create(user("b"), &[]).await.unwrap();

    assert_eq!(first.id, again.id);
    assert_ne!(first.id, other.id);
    assert_eq!(crud.count(&StructuredQuery::new()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_update_map_writes_zero_values() {
    let crud = GenericCrud::<User, _>::new(MemoryExecutor::new());
    let mut created = crud.create(user("a"), &[]).await.unwrap();
    crud.update_field(&created, UserColumn::Age, SqlValue::Integer(40))
        .await
        .unwrap();

    let mut map = BTreeMap::new();
    map.insert(UserColumn::Age, SqlValue::Null);
    map.insert(UserColumn::CreatedAt, SqlValue::Null);
    assert_eq!(crud.update_map(&created, &map).await.unwrap(), 1);

    let reloaded = crud.get_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.age, None);
    assert_eq!(reloaded.created_at, created.created_at);

    created.id = 999;
    assert_eq!(crud.update_map(&created, &map).await.unwrap(), 0);
}

#[tokio::test]
async fn test_read_omit_blanks_columns() {
    let crud = GenericCrud::<User, _>::new(MemoryExecutor::new());
    let mut record = user("a");
    record.email = Some("a@example.com".to_string());
    crud.create(record, &[]).await.unwrap();

    let rows = crud.query(&user("a"), &[UserColumn::Email]).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, None);
    assert_eq!(rows[0].name, "a");
}

#[tokio::test]
async fn test_unknown_foreign_key_is_relation_error() {
    let executor = MemoryExecutor::new();
    let authors = GenericCrud::<Author, _>::new(executor);
    authors
        .create(
            Author {
                pen_name: "anon".to_string(),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();

    let query = StructuredQuery::<Author>::new().preload(AuthorRelation::Posts);
    let err = authors.smart_query(&query).await.unwrap_err();
    assert!(matches!(
        err,
        CrudError::Relation {
            table: "authors",
            relation: "posts",
            ..
        }
    ));

    // No relation requested, nothing to resolve
    assert_eq!(authors.smart_query(&StructuredQuery::new()).await.unwrap().len(), 1);
}
