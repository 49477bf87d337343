use super::*;
use crate::executor::DeleteMode;
use crate::test_models::{Post, PostColumn, User, UserColumn, UserRelation};
use std::collections::BTreeMap;
use type_mapping::SqlValue;

fn user_named(name: &str) -> User {
    User {
        name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_by_example_skips_zero_fields() {
    let set = Translator::by_example(&user_named("a"));
    assert_eq!(
        set.predicates(),
        &[Predicate::Equal {
            column: UserColumn::Name,
            value: SqlValue::Text("a".to_string()),
        }]
    );
}

#[test]
fn test_by_example_some_zero_still_filters() {
    let example = User {
        age: Some(0),
        ..Default::default()
    };
    let set = Translator::by_example(&example);
    assert_eq!(
        set.predicates(),
        &[Predicate::Equal {
            column: UserColumn::Age,
            value: SqlValue::Integer(0),
        }]
    );
}

#[test]
fn test_all_zero_example_selects_live_rows() {
    let set = Translator::by_example(&User::default());
    assert!(set.predicates().is_empty());

    let (sql, params) = SqlGenerator::select(&set);
    assert_eq!(sql, r#"SELECT * FROM "users" WHERE "deleted_at" IS NULL"#);
    assert!(params.is_empty());
}

#[test]
fn test_by_map_keeps_zero_values() {
    let mut map = BTreeMap::new();
    map.insert(UserColumn::Name, SqlValue::from(""));
    map.insert(UserColumn::Id, SqlValue::BigInt(0));

    let set = Translator::by_map::<User>(&map);
    let (sql, params) = SqlGenerator::select(&set);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE "id" = $1 AND "name" = $2 AND "deleted_at" IS NULL"#
    );
    assert_eq!(
        params,
        vec![SqlValue::BigInt(0), SqlValue::Text(String::new())]
    );
}

#[test]
fn test_structured_clause_order_and_placeholders() {
    let query = StructuredQuery::<User>::new()
        .between(UserColumn::Id, 1i64, 10i64)
        .is_null(UserColumn::Email)
        .like(UserColumn::Name, "es")
        .equal(UserColumn::Age, 30)
        .order_by(UserColumn::Id, SortOrder::Desc)
        .limit(5);

    let (sql, params) = SqlGenerator::select(&Translator::structured(&query));
    assert_eq!(
        sql,
        concat!(
            r#"SELECT * FROM "users" WHERE "age" = $1 AND "name" LIKE $2"#,
            r#" AND "id" BETWEEN $3 AND $4 AND "email" IS NULL AND "deleted_at" IS NULL"#,
            r#" ORDER BY "id" DESC LIMIT 5"#
        )
    );
    assert_eq!(
        params,
        vec![
            SqlValue::Integer(30),
            SqlValue::Text("%es%".to_string()),
            SqlValue::BigInt(1),
            SqlValue::BigInt(10),
        ]
    );
}

#[test]
fn test_equal_null_renders_inline() {
    let query = StructuredQuery::<User>::new().equal(UserColumn::Email, None::<String>);
    let (sql, params) = SqlGenerator::select(&Translator::structured(&query));
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE "email" IS NULL AND "deleted_at" IS NULL"#
    );
    assert!(params.is_empty());
}

#[test]
fn test_like_value_is_escaped() {
    let query = StructuredQuery::<User>::new().like(UserColumn::Name, "50%_off");
    let (_, params) = SqlGenerator::select(&Translator::structured(&query));
    assert_eq!(params, vec![SqlValue::Text("%50\\%\\_off%".to_string())]);
}

#[test]
fn test_ordering_keeps_caller_sequence() {
    let query = StructuredQuery::<User>::new()
        .order_by(UserColumn::Name, SortOrder::Asc)
        .order_by(UserColumn::Id, SortOrder::Desc);
    let set = Translator::structured(&query);
    assert_eq!(
        SqlGenerator::build_order_clause(set.ordering()),
        r#" ORDER BY "name" ASC, "id" DESC"#
    );
}

#[test]
fn test_with_deleted_drops_scope() {
    let query = StructuredQuery::<User>::new().with_deleted().offset(20);
    let (sql, _) = SqlGenerator::select(&Translator::structured(&query));
    assert_eq!(sql, r#"SELECT * FROM "users" OFFSET 20"#);
}

#[test]
fn test_preload_is_deduplicated() {
    let query = StructuredQuery::<User>::new()
        .preload(UserRelation::Posts)
        .preload(UserRelation::Posts);
    let set = Translator::structured(&query);
    assert_eq!(set.relations(), &[UserRelation::Posts]);
}

#[test]
fn test_record_without_soft_delete_has_no_scope() {
    let (sql, _) = SqlGenerator::count(&PredicateSet::<Post>::new());
    assert_eq!(sql, r#"SELECT COUNT(*) AS total FROM "posts""#);
}

#[test]
fn test_empty_in_matches_nothing() {
    let set = PredicateSet::<Post>::new().filter(Predicate::any_of(PostColumn::UserId, vec![]));
    let (sql, params) = SqlGenerator::select(&set);
    assert_eq!(sql, r#"SELECT * FROM "posts" WHERE 1=0"#);
    assert!(params.is_empty());
}

#[test]
fn test_in_placeholders() {
    let set = PredicateSet::<Post>::new().filter(Predicate::any_of(
        PostColumn::UserId,
        vec![SqlValue::BigInt(1), SqlValue::BigInt(2)],
    ));
    let (sql, params) = SqlGenerator::select(&set);
    assert_eq!(sql, r#"SELECT * FROM "posts" WHERE "user_id" IN ($1, $2)"#);
    assert_eq!(params.len(), 2);
}

#[test]
fn test_insert_stamps_timestamps() {
    let user = User {
        name: "a".to_string(),
        age: Some(3),
        ..Default::default()
    };
    let columns = [
        UserColumn::Name,
        UserColumn::Email,
        UserColumn::Age,
        UserColumn::DeletedAt,
    ];
    let (sql, params) = SqlGenerator::insert(&user, &columns);
    assert_eq!(
        sql,
        concat!(
            r#"INSERT INTO "users" ("name", "email", "age", "deleted_at", "created_at", "updated_at")"#,
            r#" VALUES ($1, NULL, $2, NULL, NOW(), NOW()) RETURNING *"#
        )
    );
    assert_eq!(
        params,
        vec![SqlValue::Text("a".to_string()), SqlValue::Integer(3)]
    );
}

#[test]
fn test_update_numbers_assignments_first() {
    let set = Translator::by_primary_key::<User>(7);
    let assignments = vec![
        (UserColumn::Name, SqlValue::from("b")),
        (UserColumn::Email, SqlValue::Null),
    ];
    let (sql, params) = SqlGenerator::update(&set, &assignments).unwrap();
    assert_eq!(
        sql,
        concat!(
            r#"UPDATE "users" SET "name" = $1, "email" = NULL, "updated_at" = NOW()"#,
            r#" WHERE "id" = $2 AND "deleted_at" IS NULL"#
        )
    );
    assert_eq!(
        params,
        vec![SqlValue::Text("b".to_string()), SqlValue::BigInt(7)]
    );
}

#[test]
fn test_update_without_assignments_is_skipped() {
    let set = Translator::by_primary_key::<User>(7);
    assert!(SqlGenerator::update(&set, &[]).is_none());
}

#[test]
fn test_delete_modes() {
    let set = Translator::by_primary_key::<User>(7);
    let (soft, _) = SqlGenerator::delete(&set, DeleteMode::Soft);
    assert_eq!(
        soft,
        r#"UPDATE "users" SET "deleted_at" = NOW() WHERE "id" = $1 AND "deleted_at" IS NULL"#
    );

    let (hard, _) = SqlGenerator::delete(&set.with_deleted(true), DeleteMode::Hard);
    assert_eq!(hard, r#"DELETE FROM "users" WHERE "id" = $1"#);

    let (post, _) = SqlGenerator::delete(&Translator::by_primary_key::<Post>(1), DeleteMode::Soft);
    assert_eq!(post, r#"DELETE FROM "posts" WHERE "id" = $1"#);
}

#[test]
fn test_quote_identifier_escapes_quotes() {
    assert_eq!(SqlGenerator::quote_identifier("we\"ird"), "\"we\"\"ird\"");
}

#[test]
fn test_resolve_singleton_outcomes() {
    let none = Translator::resolve_singleton::<User>(vec![]);
    assert!(none.unwrap_err().is_not_found());

    let one = Translator::resolve_singleton(vec![user_named("a")]).unwrap();
    assert_eq!(one.name, "a");

    let many = Translator::resolve_singleton(vec![user_named("a"), user_named("a")]);
    assert!(many.unwrap_err().is_multiple_results());
}
