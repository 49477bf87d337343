use crate::errors::CrudError;
use crate::executor::Executor;
use crate::query::{PredicateSet, Translator};
use crate::traits::{Column, ColumnOf, Record};
use std::collections::BTreeSet;
use std::marker::PhantomData;
use type_mapping::SqlValue;

/// Generic CRUD store over one record type and one executor
#[derive(Clone)]
pub struct GenericCrud<T: Record, E: Executor> {
    pub(crate) executor: E,
    pub(crate) omit: Vec<ColumnOf<T>>,
    pub(crate) _phantom: PhantomData<fn() -> T>,
}

impl<T: Record, E: Executor> std::fmt::Debug for GenericCrud<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericCrud")
            .field("table", &T::table_name())
            .field("omit", &self.omit)
            .finish()
    }
}

impl<T: Record, E: Executor> GenericCrud<T, E> {
    pub fn new(executor: E) -> Self {
        Self::with_omit(executor, [])
    }

    /// Store whose writes always leave out `omit`, on top of the timestamp columns
    pub fn with_omit(executor: E, omit: impl IntoIterator<Item = ColumnOf<T>>) -> Self {
        Self {
            executor,
            omit: omit.into_iter().collect(),
            _phantom: PhantomData,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn default_omit(&self) -> &[ColumnOf<T>] {
        &self.omit
    }

    /// Timestamp columns, the store defaults and the per-call list
    pub(crate) fn write_omit(&self, omit: &[ColumnOf<T>]) -> BTreeSet<ColumnOf<T>> {
        T::timestamp_columns()
            .into_iter()
            .chain(self.omit.iter().copied())
            .chain(omit.iter().copied())
            .collect()
    }

    /// Columns written on insert; a zero primary key is left to the executor
    pub(crate) fn insert_columns(&self, record: &T, omit: &[ColumnOf<T>]) -> Vec<ColumnOf<T>> {
        let omitted = self.write_omit(omit);
        let pk = T::primary_key_column();
        <ColumnOf<T> as Column>::all()
            .iter()
            .copied()
            .filter(|column| !omitted.contains(column))
            .filter(|column| *column != pk || record.has_primary_key())
            .collect()
    }

    /// Non-zero, non-key columns of `record` outside the write-omit set
    pub(crate) fn update_assignments(
        &self,
        record: &T,
        omit: &[ColumnOf<T>],
    ) -> Vec<(ColumnOf<T>, SqlValue)> {
        let omitted = self.write_omit(omit);
        let pk = T::primary_key_column();
        <ColumnOf<T> as Column>::all()
            .iter()
            .copied()
            .filter(|column| *column != pk && !omitted.contains(column))
            .filter(|column| !record.column_is_zero(*column))
            .map(|column| (column, record.value(column)))
            .collect()
    }

    /// Predicate set addressing `record` by primary key
    pub(crate) fn key_set(
        &self,
        record: &T,
        operation: &'static str,
    ) -> Result<PredicateSet<T>, CrudError> {
        if !record.has_primary_key() {
            return Err(CrudError::missing_primary_key(T::table_name(), operation));
        }
        Ok(Translator::by_primary_key(record.primary_key()))
    }

    /// Select, eager-load the requested relations, then blank omitted columns
    pub(crate) async fn fetch(&self, set: PredicateSet<T>) -> Result<Vec<T>, CrudError> {
        let mut rows = self.executor.select(&set).await?;

        for relation in set.relations() {
            T::eager_load(&mut rows, *relation, &self.executor).await?;
        }

        let omitted = set.omitted();
        if !omitted.is_empty() {
            for row in rows.iter_mut() {
                for column in omitted {
                    row.reset_value(*column);
                }
            }
        }

        Ok(rows)
    }

    /// Fetch at most two rows and resolve them to exactly one
    pub(crate) async fn fetch_one(&self, set: PredicateSet<T>) -> Result<T, CrudError> {
        let rows = self.fetch(set.limit(Some(2))).await?;
        Translator::resolve_singleton(rows)
    }
}
