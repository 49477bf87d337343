//! Translated predicate set
//!
//! The storage-agnostic output of the translator. Executors either render it
//! to SQL or evaluate it in memory.

use crate::query::filter::Predicate;
use crate::query::ordering::SortOrder;
use crate::traits::{ColumnOf, Record, RelationOf};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct PredicateSet<T: Record> {
    predicates: Vec<Predicate<ColumnOf<T>>>,
    order_by: Vec<(ColumnOf<T>, SortOrder)>,
    preload: Vec<RelationOf<T>>,
    omit: BTreeSet<ColumnOf<T>>,
    with_deleted: bool,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl<T: Record> Default for PredicateSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> PredicateSet<T> {
    /// Empty set: matches every live row
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            order_by: Vec::new(),
            preload: Vec::new(),
            omit: BTreeSet::new(),
            with_deleted: false,
            limit: None,
            offset: None,
        }
    }

    pub fn filter(mut self, predicate: Predicate<ColumnOf<T>>) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, column: ColumnOf<T>, order: SortOrder) -> Self {
        self.order_by.push((column, order));
        self
    }

    pub fn preload(mut self, relation: RelationOf<T>) -> Self {
        if !self.preload.contains(&relation) {
            self.preload.push(relation);
        }
        self
    }

    pub fn omit(mut self, columns: impl IntoIterator<Item = ColumnOf<T>>) -> Self {
        self.omit.extend(columns);
        self
    }

    pub fn with_deleted(mut self, with_deleted: bool) -> Self {
        self.with_deleted = with_deleted;
        self
    }

    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: Option<i64>) -> Self {
        self.offset = offset;
        self
    }

    /// Caller predicates, without the soft-delete scope
    pub fn predicates(&self) -> &[Predicate<ColumnOf<T>>] {
        &self.predicates
    }

    /// Caller predicates plus `deleted IS NULL` when the soft-delete scope applies
    pub fn scoped_predicates(&self) -> Vec<Predicate<ColumnOf<T>>> {
        let mut predicates = self.predicates.clone();
        if !self.with_deleted {
            if let Some(column) = T::soft_delete_column() {
                predicates.push(Predicate::is_null(column));
            }
        }
        predicates
    }

    pub fn ordering(&self) -> &[(ColumnOf<T>, SortOrder)] {
        &self.order_by
    }

    pub fn relations(&self) -> &[RelationOf<T>] {
        &self.preload
    }

    pub fn omitted(&self) -> &BTreeSet<ColumnOf<T>> {
        &self.omit
    }

    pub fn includes_deleted(&self) -> bool {
        self.with_deleted
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<i64> {
        self.offset
    }

    /// Evaluate the scoped predicates against an in-memory record
    pub fn matches(&self, record: &T) -> bool {
        self.scoped_predicates()
            .iter()
            .all(|predicate| predicate.matches(record))
    }
}
