//! CRUD round trip against a live PostgreSQL database
//!
//! Runs only when `DATABASE_URL` is set; otherwise every test returns early.

use crudhaus::prelude::*;
use std::collections::BTreeMap;

#[model]
#[table(name = "crudhaus_pg_members")]
pub struct Member {
    #[primary_key]
    pub id: i64,
    pub name: String,
    pub age: Option<i16>,
    #[created_at]
    pub created_at: Option<DateTime<Utc>>,
    #[updated_at]
    pub updated_at: Option<DateTime<Utc>>,
    #[soft_delete]
    pub deleted_at: Option<DateTime<Utc>>,
    #[has_many(Note, foreign_key = "member_id")]
    pub notes: Vec<Note>,
}

#[model]
#[table(name = "crudhaus_pg_notes")]
pub struct Note {
    #[primary_key]
    pub id: i64,
    pub member_id: i64,
    pub body: String,
}

async fn connect() -> Option<Crudhaus> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.expect("connect to DATABASE_URL");

    for statement in [
        "DROP TABLE IF EXISTS crudhaus_pg_notes",
        "DROP TABLE IF EXISTS crudhaus_pg_members",
        "CREATE TABLE crudhaus_pg_members (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            age SMALLINT,
            created_at TIMESTAMPTZ,
            updated_at TIMESTAMPTZ,
            deleted_at TIMESTAMPTZ
        )",
        "CREATE TABLE crudhaus_pg_notes (
            id BIGSERIAL PRIMARY KEY,
            member_id BIGINT NOT NULL,
            body TEXT NOT NULL
        )",
    ] {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("prepare schema");
    }

    Some(Crudhaus::from_pool(pool))
}

fn member(name: &str, age: Option<i16>) -> Member {
    Member {
        name: name.to_string(),
        age,
        ..Default::default()
    }
}

// Both scenarios share tables, so they run in sequence inside one test
#[tokio::test]
async fn test_postgres_crud_flow() {
    let Some(crudhaus) = connect().await else {
        return;
    };
    crudhaus.health_check().await.unwrap();

    let members = crudhaus.crud::<Member>();
    let notes = crudhaus.crud::<Note>();

    let created = members.create(member("test", Some(11)), &[]).await.unwrap();
    assert!(created.id > 0);
    assert!(created.created_at.is_some());

    let existing = members
        .get_or_create(member("test", Some(11)), &[])
        .await
        .unwrap();
    assert_eq!(existing.id, created.id);
    members
        .get_or_create(member("test2", Some(12)), &[])
        .await
        .unwrap();

    assert_eq!(members.query(&Member::default(), &[]).await.unwrap().len(), 2);
    assert!(
        members
            .query_one(&Member::default(), &[])
            .await
            .unwrap_err()
            .is_multiple_results()
    );
    assert!(
        members
            .query_one(&member("test2", Some(11)), &[])
            .await
            .unwrap_err()
            .is_not_found()
    );

    members
        .update_field(&created, MemberColumn::Age, SqlValue::from(111i16))
        .await
        .unwrap();
    let mut by_map = BTreeMap::new();
    by_map.insert(MemberColumn::Id, SqlValue::from(created.id));
    by_map.insert(MemberColumn::Age, SqlValue::Integer(111));
    assert_eq!(members.query_map_one(&by_map).await.unwrap().name, "test");

    let like = members
        .smart_query(
            &StructuredQuery::new()
                .like(MemberColumn::Name, "est")
                .order_by(MemberColumn::Id, SortOrder::Desc),
        )
        .await
        .unwrap();
    assert_eq!(like.len(), 2);
    assert_eq!(like[0].name, "test2");
    assert_eq!(
        members
            .count(&StructuredQuery::new().between(MemberColumn::Age, 12i16, 111i16))
            .await
            .unwrap(),
        2
    );

    notes
        .create(
            Note {
                member_id: created.id,
                body: "hello".to_string(),
                ..Default::default()
            },
            &[],
        )
        .await
        .unwrap();
    let loaded = members
        .smart_query_one(
            &StructuredQuery::new()
                .equal(MemberColumn::Id, created.id)
                .preload(MemberRelation::Notes),
        )
        .await
        .unwrap();
    assert_eq!(loaded.notes.len(), 1);

    assert!(members.delete(&created).await.unwrap());
    assert!(members.get_by_id(created.id).await.unwrap_err().is_not_found());
    assert!(members.delete_permanently(&created).await.unwrap());
    assert_eq!(
        members
            .count(&StructuredQuery::new().with_deleted())
            .await
            .unwrap(),
        1
    );
}
