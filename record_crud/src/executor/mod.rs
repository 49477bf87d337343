//! Storage executors
//!
//! The `Executor` trait is the boundary between the CRUD surface and storage.
//! `PgExecutor` talks to PostgreSQL; `MemoryExecutor` evaluates the same
//! predicate sets in process.

pub mod memory;
pub mod postgres;

pub use memory::MemoryExecutor;
pub use postgres::PgExecutor;

use crate::errors::CrudError;
use crate::query::PredicateSet;
use crate::traits::{ColumnOf, Record};
use async_trait::async_trait;
use type_mapping::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Stamp the soft-delete column; falls back to `Hard` for records without one
    Soft,
    Hard,
}

#[async_trait]
pub trait Executor: Send + Sync {
    /// Rows matching the set, ordered and paginated as it says
    async fn select<T: Record>(&self, set: &PredicateSet<T>) -> Result<Vec<T>, CrudError>;

    async fn count<T: Record>(&self, set: &PredicateSet<T>) -> Result<i64, CrudError>;

    /// Insert `columns` of `record`; returns the stored row with generated values
    async fn insert<T: Record>(&self, record: &T, columns: &[ColumnOf<T>]) -> Result<T, CrudError>;

    /// Apply `assignments` to every matching row; returns the affected row count
    async fn update<T: Record>(
        &self,
        set: &PredicateSet<T>,
        assignments: &[(ColumnOf<T>, SqlValue)],
    ) -> Result<u64, CrudError>;

    async fn delete<T: Record>(
        &self,
        set: &PredicateSet<T>,
        mode: DeleteMode,
    ) -> Result<u64, CrudError>;
}
