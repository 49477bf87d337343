//! Dynamic SQL literal
//!
//! [`SqlValue`] is the currency of predicates, assignments and bound
//! parameters. Numeric variants compare with each other regardless of width.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Text(String),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Integer view of the three integer widths
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::SmallInt(v) => Some(i64::from(*v)),
            SqlValue::Integer(v) => Some(i64::from(*v)),
            SqlValue::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Float(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// SQL-style comparison.
    ///
    /// Returns `None` when either side is NULL or the variants are not
    /// comparable, which callers treat as "predicate does not hold".
    pub fn compare(&self, other: &SqlValue) -> Option<Ordering> {
        match (self, other) {
            (SqlValue::Null, _) | (_, SqlValue::Null) => None,
            (SqlValue::Text(a), SqlValue::Text(b)) => Some(a.cmp(b)),
            (SqlValue::Boolean(a), SqlValue::Boolean(b)) => Some(a.cmp(b)),
            (SqlValue::Uuid(a), SqlValue::Uuid(b)) => Some(a.cmp(b)),
            (SqlValue::Timestamp(a), SqlValue::Timestamp(b)) => Some(a.cmp(b)),
            (SqlValue::Json(a), SqlValue::Json(b)) => (a == b).then_some(Ordering::Equal),
            (a, b) => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
            },
        }
    }

    /// Equality with SQL semantics: NULL equals nothing
    pub fn sql_eq(&self, other: &SqlValue) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<i16> for SqlValue {
    fn from(val: i16) -> Self {
        SqlValue::SmallInt(val)
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::Integer(val)
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::BigInt(val)
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Float(val)
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Boolean(val)
    }
}

impl From<Uuid> for SqlValue {
    fn from(val: Uuid) -> Self {
        SqlValue::Uuid(val)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(val: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(val)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::Null => SqlValue::Null,
            other => SqlValue::Json(other),
        }
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_numeric_widths_compare_equal() {
        assert!(SqlValue::SmallInt(11).sql_eq(&SqlValue::BigInt(11)));
        assert!(SqlValue::Integer(3).sql_eq(&SqlValue::Float(3.0)));
        assert_eq!(
            SqlValue::Integer(1).compare(&SqlValue::BigInt(2)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_null_never_compares() {
        assert_eq!(SqlValue::Null.compare(&SqlValue::Null), None);
        assert!(!SqlValue::Null.sql_eq(&SqlValue::Integer(0)));
        assert!(!SqlValue::Text("a".into()).sql_eq(&SqlValue::Null));
    }

    #[test]
    fn test_mismatched_variants_do_not_compare() {
        assert_eq!(SqlValue::Text("1".into()).compare(&SqlValue::Integer(1)), None);
        assert_eq!(SqlValue::Boolean(true).compare(&SqlValue::Integer(1)), None);
    }

    #[test]
    fn test_timestamps_order() {
        let early = Utc.with_ymd_and_hms(2023, 1, 23, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2023, 1, 24, 0, 0, 0).unwrap();
        assert_eq!(
            SqlValue::from(early).compare(&SqlValue::from(late)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(5i16)), SqlValue::SmallInt(5));
        assert_eq!(SqlValue::from(serde_json::Value::Null), SqlValue::Null);
    }
}
