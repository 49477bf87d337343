//! In-process executor
//!
//! Evaluates predicate sets against rows held in memory, following the same
//! rules as the PostgreSQL rendering: NULL never matches a comparison, LIKE is
//! case-sensitive, and ASC puts NULLs last.

use super::{DeleteMode, Executor};
use crate::errors::CrudError;
use crate::query::{PredicateSet, SortOrder};
use crate::traits::{Column, ColumnOf, Record};
use async_trait::async_trait;
use chrono::Utc;
use std::any::Any;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use type_mapping::SqlValue;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("table {table} is registered with a different record type")]
    TypeMismatch { table: &'static str },

    #[error("duplicate key value violates primary key of {table}")]
    DuplicateKey { table: &'static str },

    #[error("cannot generate a value for primary key {column} of {table}")]
    KeyGeneration {
        table: &'static str,
        column: &'static str,
    },
}

struct Table {
    rows: Box<dyn Any + Send + Sync>,
    next_id: i64,
}

impl Table {
    fn new<T: Record>() -> Self {
        Self {
            rows: Box::new(Vec::<T>::new()),
            next_id: 1,
        }
    }
}

/// Executor over an in-memory store shared by every clone
#[derive(Clone, Default)]
pub struct MemoryExecutor {
    tables: Arc<RwLock<HashMap<&'static str, Table>>>,
}

impl std::fmt::Debug for MemoryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryExecutor").finish_non_exhaustive()
    }
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row of `T`, soft-deleted rows included
    pub async fn snapshot<T: Record>(&self) -> Result<Vec<T>, CrudError> {
        let tables = self.tables.read().await;
        Ok(rows::<T>(&tables)?.to_vec())
    }
}

fn rows<'a, T: Record>(tables: &'a HashMap<&'static str, Table>) -> Result<&'a [T], CrudError> {
    match tables.get(T::table_name()) {
        None => Ok(&[]),
        Some(table) => table
            .rows
            .downcast_ref::<Vec<T>>()
            .map(Vec::as_slice)
            .ok_or_else(|| type_mismatch::<T>("select")),
    }
}

fn table_mut<'a, T: Record>(
    tables: &'a mut HashMap<&'static str, Table>,
    operation: &'static str,
) -> Result<(&'a mut Vec<T>, &'a mut i64), CrudError> {
    let table = tables
        .entry(T::table_name())
        .or_insert_with(Table::new::<T>);
    let rows = table
        .rows
        .downcast_mut::<Vec<T>>()
        .ok_or_else(|| type_mismatch::<T>(operation))?;
    Ok((rows, &mut table.next_id))
}

fn type_mismatch<T: Record>(operation: &'static str) -> CrudError {
    CrudError::execution(
        T::table_name(),
        operation,
        MemoryError::TypeMismatch {
            table: T::table_name(),
        },
    )
}

/// ASC comparison with NULLs sorting after every value
fn compare_nulls_last(a: &SqlValue, b: &SqlValue) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}

fn compare_rows<T: Record>(a: &T, b: &T, order_by: &[(ColumnOf<T>, SortOrder)]) -> Ordering {
    order_by
        .iter()
        .map(|(column, order)| {
            order.apply(compare_nulls_last(&a.value(*column), &b.value(*column)))
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Fill a zero primary key from the table sequence, or with a v4 UUID
fn generate_key<T: Record>(record: &mut T, next_id: &mut i64) -> Result<(), CrudError> {
    let column = T::primary_key_column();
    let key_error = || {
        CrudError::execution(
            T::table_name(),
            "insert",
            MemoryError::KeyGeneration {
                table: T::table_name(),
                column: column.name(),
            },
        )
    };

    let generated = match record.value(column) {
        SqlValue::SmallInt(_) => {
            SqlValue::SmallInt(i16::try_from(*next_id).map_err(|_| key_error())?)
        }
        SqlValue::Integer(_) => {
            SqlValue::Integer(i32::try_from(*next_id).map_err(|_| key_error())?)
        }
        SqlValue::BigInt(_) => SqlValue::BigInt(*next_id),
        SqlValue::Text(_) => SqlValue::Text(next_id.to_string()),
        SqlValue::Uuid(_) => SqlValue::Uuid(Uuid::new_v4()),
        _ => return Err(key_error()),
    };
    if !matches!(generated, SqlValue::Uuid(_)) {
        *next_id += 1;
    }

    record
        .set_value(column, generated)
        .map_err(|e| CrudError::conversion(T::table_name(), column.name(), e))
}

fn stamp<T: Record>(record: &mut T, column: Option<ColumnOf<T>>) -> Result<(), CrudError> {
    match column {
        Some(column) => record
            .set_value(column, SqlValue::Timestamp(Utc::now()))
            .map_err(|e| CrudError::conversion(T::table_name(), column.name(), e)),
        None => Ok(()),
    }
}

#[async_trait]
impl Executor for MemoryExecutor {
    async fn select<T: Record>(&self, set: &PredicateSet<T>) -> Result<Vec<T>, CrudError> {
        let tables = self.tables.read().await;
        let predicates = set.scoped_predicates();

        let mut matched: Vec<T> = rows::<T>(&tables)?
            .iter()
            .filter(|row| predicates.iter().all(|p| p.matches(*row)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| compare_rows(a, b, set.ordering()));

        let offset = set.offset_value().unwrap_or(0).max(0) as usize;
        let limit = set
            .limit_value()
            .map(|limit| limit.max(0) as usize)
            .unwrap_or(usize::MAX);

        trace_log!("[SELECT] Table: {} matched {} rows in memory", T::table_name(), matched.len());
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn count<T: Record>(&self, set: &PredicateSet<T>) -> Result<i64, CrudError> {
        let tables = self.tables.read().await;
        let predicates = set.scoped_predicates();
        let total = rows::<T>(&tables)?
            .iter()
            .filter(|row| predicates.iter().all(|p| p.matches(*row)))
            .count();
        Ok(total as i64)
    }

    async fn insert<T: Record>(&self, record: &T, columns: &[ColumnOf<T>]) -> Result<T, CrudError> {
        let mut tables = self.tables.write().await;
        let (rows, next_id) = table_mut::<T>(&mut tables, "insert")?;

        let mut stored = record.clone();
        stored.detach_relations();
        for column in <ColumnOf<T> as Column>::all() {
            if !columns.contains(column) {
                stored.reset_value(*column);
            }
        }

        let pk = T::primary_key_column();
        if stored.column_is_zero(pk) {
            generate_key(&mut stored, next_id)?;
        } else {
            let key = stored.value(pk);
            if rows.iter().any(|row| row.value(pk).sql_eq(&key)) {
                return Err(CrudError::execution(
                    T::table_name(),
                    "insert",
                    MemoryError::DuplicateKey {
                        table: T::table_name(),
                    },
                ));
            }
            if let Some(id) = key.as_i64() {
                *next_id = (*next_id).max(id.saturating_add(1));
            }
        }

        stamp(&mut stored, T::created_at_column())?;
        stamp(&mut stored, T::updated_at_column())?;

        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update<T: Record>(
        &self,
        set: &PredicateSet<T>,
        assignments: &[(ColumnOf<T>, SqlValue)],
    ) -> Result<u64, CrudError> {
        let updated_at = T::updated_at_column();
        let assignments: Vec<&(ColumnOf<T>, SqlValue)> = assignments
            .iter()
            .filter(|(column, _)| Some(*column) != updated_at)
            .collect();
        if assignments.is_empty() {
            return Ok(0);
        }

        let mut tables = self.tables.write().await;
        let (rows, next_id) = table_mut::<T>(&mut tables, "update")?;
        let predicates = set.scoped_predicates();

        let mut staged = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            if !predicates.iter().all(|p| p.matches(row)) {
                continue;
            }
            let mut updated = row.clone();
            for (column, value) in &assignments {
                updated
                    .set_value(*column, value.clone())
                    .map_err(|e| CrudError::conversion(T::table_name(), column.name(), e))?;
            }
            stamp(&mut updated, updated_at)?;
            staged.push((index, updated));
        }

        let pk = T::primary_key_column();
        if assignments.iter().any(|(column, _)| *column == pk) {
            let untouched = rows
                .iter()
                .enumerate()
                .filter(|(index, _)| !staged.iter().any(|(staged_index, _)| staged_index == index));
            let keys: Vec<SqlValue> = untouched
                .map(|(_, row)| row.value(pk))
                .chain(staged.iter().map(|(_, row)| row.value(pk)))
                .collect();
            let duplicate = keys
                .iter()
                .enumerate()
                .any(|(i, key)| keys[i + 1..].iter().any(|other| key.sql_eq(other)));
            if duplicate {
                return Err(CrudError::execution(
                    T::table_name(),
                    "update",
                    MemoryError::DuplicateKey {
                        table: T::table_name(),
                    },
                ));
            }
            if let Some(max) = keys.iter().filter_map(SqlValue::as_i64).max() {
                *next_id = (*next_id).max(max.saturating_add(1));
            }
        }

        let affected = staged.len() as u64;
        for (index, updated) in staged {
            rows[index] = updated;
        }
        Ok(affected)
    }

    async fn delete<T: Record>(
        &self,
        set: &PredicateSet<T>,
        mode: DeleteMode,
    ) -> Result<u64, CrudError> {
        let mut tables = self.tables.write().await;
        let (rows, _) = table_mut::<T>(&mut tables, "delete")?;
        let predicates = set.scoped_predicates();
        let matches = |row: &T| predicates.iter().all(|p| p.matches(row));

        match (mode, T::soft_delete_column()) {
            (DeleteMode::Soft, Some(column)) => {
                let mut affected = 0;
                for row in rows.iter_mut().filter(|row| matches(&**row)) {
                    stamp(row, Some(column))?;
                    affected += 1;
                }
                Ok(affected)
            }
            _ => {
                let before = rows.len();
                rows.retain(|row| !matches(row));
                Ok((before - rows.len()) as u64)
            }
        }
    }
}
