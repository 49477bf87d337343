//! Predicates
//!
//! A predicate constrains one column. Every predicate of a set must hold for a
//! row to match; there is no OR.

use crate::traits::{Column, Record};
use std::cmp::Ordering;
use type_mapping::SqlValue;

/// Single condition on one column
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<C> {
    /// `column = value`, or `column IS NULL` for a `Null` value
    Equal { column: C, value: SqlValue },
    /// `column LIKE pattern`
    Like { column: C, pattern: String },
    /// `column BETWEEN lower AND upper`, inclusive
    Between {
        column: C,
        lower: SqlValue,
        upper: SqlValue,
    },
    /// `column IN (values...)`
    In { column: C, values: Vec<SqlValue> },
    IsNull { column: C },
}

impl<C: Column> Predicate<C> {
    pub fn equal(column: C, value: impl Into<SqlValue>) -> Self {
        Self::Equal {
            column,
            value: value.into(),
        }
    }

    /// Substring match: `needle` is escaped and wrapped in `%`
    pub fn contains(column: C, needle: &str) -> Self {
        Self::Like {
            column,
            pattern: format!("%{}%", escape_like(needle)),
        }
    }

    pub fn between(column: C, lower: impl Into<SqlValue>, upper: impl Into<SqlValue>) -> Self {
        Self::Between {
            column,
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    pub fn any_of(column: C, values: Vec<SqlValue>) -> Self {
        Self::In { column, values }
    }

    pub fn is_null(column: C) -> Self {
        Self::IsNull { column }
    }

    pub fn column(&self) -> C {
        match self {
            Self::Equal { column, .. }
            | Self::Like { column, .. }
            | Self::Between { column, .. }
            | Self::In { column, .. }
            | Self::IsNull { column } => *column,
        }
    }

    /// Evaluate against an in-memory record with SQL semantics: NULL matches
    /// no comparison
    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Record<Column = C>,
    {
        let actual = record.value(self.column());
        match self {
            Self::Equal { value, .. } if value.is_null() => actual.is_null(),
            Self::Equal { value, .. } => actual.sql_eq(value),
            Self::Like { pattern, .. } => actual
                .as_str()
                .map(|text| like_matches(text, pattern))
                .unwrap_or(false),
            Self::Between { lower, upper, .. } => {
                matches!(
                    actual.compare(lower),
                    Some(Ordering::Greater | Ordering::Equal)
                ) && matches!(
                    actual.compare(upper),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
            Self::In { values, .. } => values.iter().any(|value| actual.sql_eq(value)),
            Self::IsNull { .. } => actual.is_null(),
        }
    }
}

/// Escape LIKE wildcards so `value` matches literally
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    AnySequence,
    AnyChar,
    Literal(char),
}

fn tokenize_like(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        let token = match ch {
            '%' => LikeToken::AnySequence,
            '_' => LikeToken::AnyChar,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        };
        tokens.push(token);
    }
    tokens
}

/// Case-sensitive LIKE match with backslash as the escape character
pub fn like_matches(text: &str, pattern: &str) -> bool {
    let tokens = tokenize_like(pattern);
    let chars: Vec<char> = text.chars().collect();

    let (mut t, mut p) = (0, 0);
    // Position after the last `%` and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < chars.len() {
        match tokens.get(p) {
            Some(LikeToken::AnySequence) => {
                backtrack = Some((p + 1, t));
                p += 1;
            }
            Some(LikeToken::AnyChar) => {
                t += 1;
                p += 1;
            }
            Some(LikeToken::Literal(expected)) if *expected == chars[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((resume, absorbed)) => {
                    p = resume;
                    t = absorbed + 1;
                    backtrack = Some((resume, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    tokens[p..]
        .iter()
        .all(|token| *token == LikeToken::AnySequence)
}
