//! Conversion from [`SqlValue`] back into typed fields

use crate::sql::sql_type_name;
use crate::types::SqlValue;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("cannot convert {found} into {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {value} is out of range for {expected}")]
    OutOfRange { expected: &'static str, value: i64 },

    #[error("cannot parse '{value}' as {expected}")]
    Unparsable { expected: &'static str, value: String },
}

impl ConversionError {
    fn mismatch(expected: &'static str, found: &SqlValue) -> Self {
        ConversionError::TypeMismatch {
            expected,
            found: sql_type_name(found),
        }
    }
}

/// Typed read-back of a dynamic value
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError>;
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        match value {
            SqlValue::Text(s) => Ok(s),
            other => Err(ConversionError::mismatch("VARCHAR", &other)),
        }
    }
}

macro_rules! impl_from_sql_integer {
    ($ty:ty, $name:literal) => {
        impl FromSqlValue for $ty {
            fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
                let wide = value
                    .as_i64()
                    .ok_or_else(|| ConversionError::mismatch($name, &value))?;
                <$ty>::try_from(wide).map_err(|_| ConversionError::OutOfRange {
                    expected: $name,
                    value: wide,
                })
            }
        }
    };
}

impl_from_sql_integer!(i16, "SMALLINT");
impl_from_sql_integer!(i32, "INTEGER");
impl_from_sql_integer!(i64, "BIGINT");

impl FromSqlValue for f64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        match value {
            SqlValue::Float(f) => Ok(f),
            other => other
                .as_i64()
                .map(|i| i as f64)
                .ok_or_else(|| ConversionError::mismatch("DOUBLE PRECISION", &other)),
        }
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        match value {
            SqlValue::Boolean(b) => Ok(b),
            other => Err(ConversionError::mismatch("BOOLEAN", &other)),
        }
    }
}

impl FromSqlValue for Uuid {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        match value {
            SqlValue::Uuid(u) => Ok(u),
            SqlValue::Text(s) => Uuid::parse_str(&s).map_err(|_| ConversionError::Unparsable {
                expected: "UUID",
                value: s,
            }),
            other => Err(ConversionError::mismatch("UUID", &other)),
        }
    }
}

impl FromSqlValue for DateTime<Utc> {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        match value {
            SqlValue::Timestamp(ts) => Ok(ts),
            SqlValue::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| ConversionError::Unparsable {
                    expected: "TIMESTAMP WITH TIME ZONE",
                    value: s,
                }),
            other => Err(ConversionError::mismatch("TIMESTAMP WITH TIME ZONE", &other)),
        }
    }
}

impl FromSqlValue for serde_json::Value {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        Ok(match value {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Json(v) => v,
            SqlValue::Text(s) => serde_json::Value::String(s),
            SqlValue::Boolean(b) => serde_json::Value::Bool(b),
            SqlValue::Uuid(u) => serde_json::Value::String(u.to_string()),
            SqlValue::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
            SqlValue::Float(f) => serde_json::json!(f),
            other => serde_json::json!(other.as_i64()),
        })
    }
}

impl<T: FromSqlValue> FromSqlValue for Option<T> {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        match value {
            SqlValue::Null => Ok(None),
            other => T::from_sql_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(i16::from_sql_value(SqlValue::BigInt(111)), Ok(111));
        assert_eq!(
            i16::from_sql_value(SqlValue::BigInt(100_000)),
            Err(ConversionError::OutOfRange {
                expected: "SMALLINT",
                value: 100_000
            })
        );
    }

    #[test]
    fn test_type_mismatch_reports_both_sides() {
        let err = String::from_sql_value(SqlValue::Integer(1)).unwrap_err();
        assert_eq!(
            err,
            ConversionError::TypeMismatch {
                expected: "VARCHAR",
                found: "INTEGER"
            }
        );
    }

    #[test]
    fn test_option_null_and_value() {
        assert_eq!(Option::<i32>::from_sql_value(SqlValue::Null), Ok(None));
        assert_eq!(
            Option::<i32>::from_sql_value(SqlValue::SmallInt(7)),
            Ok(Some(7))
        );
        assert!(i32::from_sql_value(SqlValue::Null).is_err());
    }

    #[test]
    fn test_text_parses_into_uuid_and_timestamp() {
        let id = Uuid::new_v4();
        assert_eq!(Uuid::from_sql_value(SqlValue::Text(id.to_string())), Ok(id));

        let ts = DateTime::<Utc>::from_sql_value(SqlValue::Text(
            "2023-01-23T00:00:00Z".to_string(),
        ))
        .unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-23T00:00:00+00:00");
    }
}
