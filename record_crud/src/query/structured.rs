//! Structured query builder
//!
//! Independent clause collections, all ANDed together.
//!
//! ```ignore
//! let query = StructuredQuery::<User>::new()
//!     .like(UserColumn::Name, "es")
//!     .between(UserColumn::Age, 18, 30)
//!     .order_by(UserColumn::Id, SortOrder::Desc)
//!     .preload(UserRelation::Posts);
//! ```

use crate::query::ordering::SortOrder;
use crate::traits::{ColumnOf, Record, RelationOf};
use std::collections::{BTreeMap, BTreeSet};
use type_mapping::SqlValue;

#[derive(Debug, Clone)]
pub struct StructuredQuery<T: Record> {
    pub(crate) equal: BTreeMap<ColumnOf<T>, SqlValue>,
    pub(crate) like: BTreeMap<ColumnOf<T>, String>,
    pub(crate) between: BTreeMap<ColumnOf<T>, (SqlValue, SqlValue)>,
    pub(crate) null: BTreeSet<ColumnOf<T>>,
    pub(crate) order_by: Vec<(ColumnOf<T>, SortOrder)>,
    pub(crate) preload: Vec<RelationOf<T>>,
    pub(crate) omit: Vec<ColumnOf<T>>,
    pub(crate) with_deleted: bool,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
}

impl<T: Record> Default for StructuredQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> StructuredQuery<T> {
    pub fn new() -> Self {
        Self {
            equal: BTreeMap::new(),
            like: BTreeMap::new(),
            between: BTreeMap::new(),
            null: BTreeSet::new(),
            order_by: Vec::new(),
            preload: Vec::new(),
            omit: Vec::new(),
            with_deleted: false,
            limit: None,
            offset: None,
        }
    }

    /// Require `column = value`. A `Null` value requires `column IS NULL`.
    pub fn equal(mut self, column: ColumnOf<T>, value: impl Into<SqlValue>) -> Self {
        self.equal.insert(column, value.into());
        self
    }

    /// Require `needle` to appear in `column` as a contiguous substring
    pub fn like(mut self, column: ColumnOf<T>, needle: impl Into<String>) -> Self {
        self.like.insert(column, needle.into());
        self
    }

    /// Require `lower <= column <= upper`
    pub fn between(
        mut self,
        column: ColumnOf<T>,
        lower: impl Into<SqlValue>,
        upper: impl Into<SqlValue>,
    ) -> Self {
        self.between.insert(column, (lower.into(), upper.into()));
        self
    }

    pub fn is_null(mut self, column: ColumnOf<T>) -> Self {
        self.null.insert(column);
        self
    }

    /// Append an ordering directive; earlier directives take precedence
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

    /// Leave `column` out of the returned records
    pub fn omit(mut self, column: ColumnOf<T>) -> Self {
        self.omit.push(column);
        self
    }

    /// Include soft-deleted rows
    pub fn with_deleted(mut self) -> Self {
        self.with_deleted = true;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// True when no clause is set
    pub fn is_empty(&self) -> bool {
        self.equal.is_empty()
            && self.like.is_empty()
            && self.between.is_empty()
            && self.null.is_empty()
    }
}
