//! Unified value model shared by the crudhaus crates
//!
//! Record fields are lowered into [`SqlValue`] for filtering and binding, and
//! raised back through [`FromSqlValue`] when a value is written into a field.
//! [`IsZero`] defines the per-type zero value that by-example filtering skips.

pub mod convert;
pub mod sql;
pub mod types;
pub mod zero;

pub use convert::{ConversionError, FromSqlValue};
pub use sql::sql_type_name;
pub use types::SqlValue;
pub use zero::IsZero;
