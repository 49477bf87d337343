//! Record capability traits
//!
//! A record type describes its table, its columns and its relations. The
//! `#[model]` attribute macro (or `#[derive(Record)]`) generates all of it.

use crate::errors::CrudError;
use crate::executor::Executor;
use async_trait::async_trait;
use std::fmt::Debug;
use std::hash::Hash;
use type_mapping::{ConversionError, FromSqlValue, IsZero, SqlValue};

/// A persisted column of a record type
///
/// Implemented by the generated `<Record>Column` enum. Variants are ordered by
/// field declaration order.
pub trait Column: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Column name as stored in the database
    fn name(&self) -> &'static str;

    /// Every column, in declaration order
    fn all() -> &'static [Self];

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|column| column.name() == name)
    }
}

/// A has-many relation of a record type, named by its field
pub trait Relation: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn all() -> &'static [Self];

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|relation| relation.name() == name)
    }
}

/// A type persisted as one row of one table
///
/// Recommended usage:
/// ```ignore
/// use crudhaus::prelude::*;
///
/// #[model]
/// #[table(name = "users")]
/// pub struct User {
///     #[primary_key]
///     pub id: i64,
///     pub name: String,
///     pub age: Option<i32>,
///     #[created_at]
///     pub created_at: Option<DateTime<Utc>>,
///     #[updated_at]
///     pub updated_at: Option<DateTime<Utc>>,
///     #[soft_delete]
///     pub deleted_at: Option<DateTime<Utc>>,
///     #[has_many(Post, foreign_key = "user_id")]
///     pub posts: Vec<Post>,
/// }
/// ```
#[async_trait]
pub trait Record:
    Clone
    + Default
    + Debug
    + Send
    + Sync
    + Unpin
    + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>
    + 'static
{
    /// The type used for the primary key
    type Id: Clone + Debug + Send + Sync + IsZero + FromSqlValue + Into<SqlValue>;

    type Column: Column;

    type Relation: Relation;

    /// The table name in the database
    fn table_name() -> &'static str;

    fn primary_key_column() -> Self::Column;

    fn primary_key(&self) -> Self::Id;

    /// Column stamped on insert
    fn created_at_column() -> Option<Self::Column> {
        None
    }

    /// Column stamped on insert and on every update
    fn updated_at_column() -> Option<Self::Column> {
        None
    }

    /// Column marking a row as deleted; rows with it set are hidden from reads
    fn soft_delete_column() -> Option<Self::Column> {
        None
    }

    /// Columns maintained by the storage layer rather than by callers
    fn timestamp_columns() -> Vec<Self::Column> {
        [Self::created_at_column(), Self::updated_at_column()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Current value of a column
    fn value(&self, column: Self::Column) -> SqlValue;

    /// Whether a column holds its type's zero value
    fn column_is_zero(&self, column: Self::Column) -> bool;

    fn set_value(&mut self, column: Self::Column, value: SqlValue) -> Result<(), ConversionError>;

    /// Put a column back to its zero value
    fn reset_value(&mut self, column: Self::Column);

    /// Clear every relation field
    fn detach_relations(&mut self) {}

    fn has_primary_key(&self) -> bool {
        !self.column_is_zero(Self::primary_key_column())
    }

    /// Populate `relation` on every record with one batched child query
    async fn eager_load<E>(
        records: &mut [Self],
        relation: Self::Relation,
        executor: &E,
    ) -> Result<(), CrudError>
    where
        E: Executor;
}

pub type ColumnOf<T> = <T as Record>::Column;
pub type RelationOf<T> = <T as Record>::Relation;
pub type IdOf<T> = <T as Record>::Id;
