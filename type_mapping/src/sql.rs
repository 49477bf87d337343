//! SQL type naming
//!
//! PostgreSQL names of the [`SqlValue`] variants, used in diagnostics.

use crate::types::SqlValue;

/// PostgreSQL type a value binds as
pub fn sql_type_name(value: &SqlValue) -> &'static str {
    match value {
        SqlValue::Null => "NULL",
        SqlValue::Text(_) => "VARCHAR",
        SqlValue::SmallInt(_) => "SMALLINT",
        SqlValue::Integer(_) => "INTEGER",
        SqlValue::BigInt(_) => "BIGINT",
        SqlValue::Float(_) => "DOUBLE PRECISION",
        SqlValue::Boolean(_) => "BOOLEAN",
        SqlValue::Uuid(_) => "UUID",
        SqlValue::Timestamp(_) => "TIMESTAMP WITH TIME ZONE",
        SqlValue::Json(_) => "JSONB",
    }
}
