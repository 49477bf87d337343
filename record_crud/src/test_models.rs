use crate::model;
use chrono::{DateTime, Utc};

#[model]
#[table(name = "users")]
pub struct User {
    #[primary_key]
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub age: Option<i32>,
    #[created_at]
    pub created_at: Option<DateTime<Utc>>,
    #[updated_at]
    pub updated_at: Option<DateTime<Utc>>,
    #[soft_delete]
    pub deleted_at: Option<DateTime<Utc>>,
    #[has_many(Post, foreign_key = "user_id")]
    pub posts: Vec<Post>,
}

#[model]
#[table(name = "posts")]
pub struct Post {
    #[primary_key]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

/// Record whose has-many names a column the child does not have
#[model]
#[table(name = "authors")]
pub struct Author {
    #[primary_key]
    pub id: i64,
    pub pen_name: String,
    #[has_many(Post, foreign_key = "author_id")]
    pub posts: Vec<Post>,
}
