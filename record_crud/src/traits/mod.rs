//! Traits for record persistence
//!
//! `Record`, `Column` and `Relation` describe a record type; `CrudStore` is
//! the operation surface over it.

pub mod crud;
pub mod record;

pub use crud::CrudStore;
pub use record::{Column, ColumnOf, IdOf, Record, Relation, RelationOf};
