//! Convenience re-exports for common record-crud usage

// Core traits
pub use crate::traits::{Column, ColumnOf, CrudStore, IdOf, Record, Relation, RelationOf};

// Derive macros
pub use record_derive::{model, Record};

// Error types
pub use crate::errors::CrudError;

// Executors
pub use crate::executor::{DeleteMode, Executor, MemoryExecutor, PgExecutor};

// Core store functionality
pub use crate::generic_crud::GenericCrud;

// Query building
pub use crate::query::{Predicate, PredicateSet, SortOrder, StructuredQuery, Translator};

// Values
pub use type_mapping::{FromSqlValue, IsZero, SqlValue};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use chrono::{DateTime, Utc};
pub use sqlx::{FromRow, PgPool};
pub use uuid::Uuid;
