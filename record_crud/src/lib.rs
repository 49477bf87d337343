//! Record CRUD - core data-access layer for crudhaus
//!
//! This crate provides the record capability traits, the filter/query
//! translator, the storage executors and the generic CRUD surface built on
//! top of them.

// Lets `#[derive(Record)]` output resolve `record_crud::...` inside this crate too.
extern crate self as record_crud;

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod errors;
pub mod executor;
pub mod generic_crud;
pub mod prelude;
pub mod query;
pub mod relation;
pub mod traits;

#[cfg(test)]
mod test_models;

pub use errors::CrudError;
pub use executor::{DeleteMode, Executor, MemoryExecutor, PgExecutor};
pub use generic_crud::GenericCrud;
pub use query::{Predicate, PredicateSet, SortOrder, SqlGenerator, StructuredQuery, Translator};
pub use traits::{Column, ColumnOf, CrudStore, IdOf, Record, Relation, RelationOf};

// Derive macros share names with the traits they implement
pub use record_derive::{model, Record};

// Re-exported for macro-generated code
pub use async_trait;
pub use sqlx;
pub use type_mapping;
pub use type_mapping::SqlValue;
