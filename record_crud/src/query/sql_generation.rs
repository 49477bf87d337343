//! PostgreSQL rendering of predicate sets
//!
//! Every value is bound as a `$n` placeholder except `NULL`, which is written
//! inline. Identifiers are always double-quoted.

use crate::executor::DeleteMode;
use crate::query::filter::Predicate;
use crate::query::ordering::SortOrder;
use crate::query::predicate_set::PredicateSet;
use crate::traits::{Column, ColumnOf, Record};
use type_mapping::SqlValue;

pub struct SqlGenerator;

impl SqlGenerator {
    pub fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn placeholder(params: &mut Vec<SqlValue>, value: SqlValue) -> String {
        params.push(value);
        format!("${}", params.len())
    }

    /// Build WHERE clause; placeholders continue from `params.len() + 1`
    pub fn build_where_clause<C: Column>(
        predicates: &[Predicate<C>],
        params: &mut Vec<SqlValue>,
    ) -> String {
        if predicates.is_empty() {
            return String::new();
        }

        let conditions_sql = predicates
            .iter()
            .map(|predicate| Self::build_predicate_sql(predicate, params))
            .collect::<Vec<_>>()
            .join(" AND ");

        format!(" WHERE {}", conditions_sql)
    }

    fn build_predicate_sql<C: Column>(
        predicate: &Predicate<C>,
        params: &mut Vec<SqlValue>,
    ) -> String {
        let field = Self::quote_identifier(predicate.column().name());

        match predicate {
            Predicate::Equal { value, .. } if value.is_null() => format!("{} IS NULL", field),
            Predicate::Equal { value, .. } => {
                format!("{} = {}", field, Self::placeholder(params, value.clone()))
            }
            Predicate::Like { pattern, .. } => {
                let param = Self::placeholder(params, SqlValue::Text(pattern.clone()));
                format!("{} LIKE {}", field, param)
            }
            Predicate::Between { lower, upper, .. } => {
                let lower = Self::placeholder(params, lower.clone());
                let upper = Self::placeholder(params, upper.clone());
                format!("{} BETWEEN {} AND {}", field, lower, upper)
            }
            Predicate::In { values, .. } => {
                let non_null: Vec<&SqlValue> = values.iter().filter(|v| !v.is_null()).collect();
                if non_null.is_empty() {
                    return "1=0".to_string();
                }
                let placeholders = non_null
                    .into_iter()
                    .map(|value| Self::placeholder(params, value.clone()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} IN ({})", field, placeholders)
            }
            Predicate::IsNull { .. } => format!("{} IS NULL", field),
        }
    }

    /// Build ORDER BY clause
    pub fn build_order_clause<C: Column>(order_by: &[(C, SortOrder)]) -> String {
        if order_by.is_empty() {
            return String::new();
        }

        let order_sql = order_by
            .iter()
            .map(|(column, order)| {
                format!("{} {}", Self::quote_identifier(column.name()), order.to_sql())
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(" ORDER BY {}", order_sql)
    }

    pub fn build_limit_clause(limit: Option<i64>, offset: Option<i64>) -> String {
        let mut clause = String::new();
        if let Some(limit) = limit {
            clause.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = offset {
            clause.push_str(&format!(" OFFSET {}", offset));
        }
        clause
    }

    pub fn select<T: Record>(set: &PredicateSet<T>) -> (String, Vec<SqlValue>) {
        let mut params = Vec::new();
        let where_clause = Self::build_where_clause(&set.scoped_predicates(), &mut params);
        let sql = format!(
            "SELECT * FROM {}{}{}{}",
            Self::quote_identifier(T::table_name()),
            where_clause,
            Self::build_order_clause(set.ordering()),
            Self::build_limit_clause(set.limit_value(), set.offset_value()),
        );
        (sql, params)
    }

    pub fn count<T: Record>(set: &PredicateSet<T>) -> (String, Vec<SqlValue>) {
        let mut params = Vec::new();
        let where_clause = Self::build_where_clause(&set.scoped_predicates(), &mut params);
        let sql = format!(
            "SELECT COUNT(*) AS total FROM {}{}",
            Self::quote_identifier(T::table_name()),
            where_clause
        );
        (sql, params)
    }

    /// INSERT of `columns`, with timestamp columns stamped by the database
    pub fn insert<T: Record>(record: &T, columns: &[ColumnOf<T>]) -> (String, Vec<SqlValue>) {
        let timestamps = T::timestamp_columns();
        let mut params = Vec::new();
        let mut names = Vec::new();
        let mut values = Vec::new();

        for column in columns.iter().filter(|c| !timestamps.contains(c)) {
            names.push(Self::quote_identifier(column.name()));
            let value = record.value(*column);
            if value.is_null() {
                values.push("NULL".to_string());
            } else {
                values.push(Self::placeholder(&mut params, value));
            }
        }
        for column in &timestamps {
            names.push(Self::quote_identifier(column.name()));
            values.push("NOW()".to_string());
        }

        let table = Self::quote_identifier(T::table_name());
        let sql = if names.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES RETURNING *", table)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
                table,
                names.join(", "),
                values.join(", ")
            )
        };
        (sql, params)
    }

    /// UPDATE with `assignments` numbered before the WHERE parameters
    ///
    /// Returns `None` when there is nothing to set.
    pub fn update<T: Record>(
        set: &PredicateSet<T>,
        assignments: &[(ColumnOf<T>, SqlValue)],
    ) -> Option<(String, Vec<SqlValue>)> {
        let updated_at = T::updated_at_column();
        let mut params = Vec::new();

        let mut set_parts: Vec<String> = assignments
            .iter()
            .filter(|(column, _)| Some(*column) != updated_at)
            .map(|(column, value)| {
                let field = Self::quote_identifier(column.name());
                if value.is_null() {
                    format!("{} = NULL", field)
                } else {
                    format!("{} = {}", field, Self::placeholder(&mut params, value.clone()))
                }
            })
            .collect();

        if set_parts.is_empty() {
            return None;
        }
        if let Some(column) = updated_at {
            set_parts.push(format!("{} = NOW()", Self::quote_identifier(column.name())));
        }

        let where_clause = Self::build_where_clause(&set.scoped_predicates(), &mut params);
        let sql = format!(
            "UPDATE {} SET {}{}",
            Self::quote_identifier(T::table_name()),
            set_parts.join(", "),
            where_clause
        );
        Some((sql, params))
    }

    /// Soft delete stamps the marker column; hard delete, or a record type
    /// without a marker, removes the rows
    pub fn delete<T: Record>(set: &PredicateSet<T>, mode: DeleteMode) -> (String, Vec<SqlValue>) {
        let mut params = Vec::new();
        let where_clause = Self::build_where_clause(&set.scoped_predicates(), &mut params);
        let table = Self::quote_identifier(T::table_name());

        let sql = match (mode, T::soft_delete_column()) {
            (DeleteMode::Soft, Some(column)) => format!(
                "UPDATE {} SET {} = NOW(){}",
                table,
                Self::quote_identifier(column.name()),
                where_clause
            ),
            _ => format!("DELETE FROM {}{}", table, where_clause),
        };
        (sql, params)
    }
}
