//! Filter/query translator
//!
//! Turns a lookup description (an example record, an explicit map or a
//! structured query) into a `PredicateSet`. Translation never fails.

use crate::errors::CrudError;
use crate::query::filter::Predicate;
use crate::query::predicate_set::PredicateSet;
use crate::query::structured::StructuredQuery;
use crate::traits::{Column, ColumnOf, Record};
use std::collections::BTreeMap;
use type_mapping::SqlValue;

pub struct Translator;

impl Translator {
    /// Equality on every non-zero field of `example`, in declaration order
    ///
    /// A field holding its zero value is indistinguishable from an unset one,
    /// so "equals zero" cannot be expressed here. Use `by_map` for that.
    pub fn by_example<T: Record>(example: &T) -> PredicateSet<T> {
        let set = <T::Column as Column>::all()
            .iter()
            .filter(|column| !example.column_is_zero(**column))
            .fold(PredicateSet::new(), |set, column| {
                set.filter(Predicate::equal(*column, example.value(*column)))
            });

        trace_log!(
            "Translated {} example into {} predicates",
            T::table_name(),
            set.predicates().len()
        );
        set
    }

    /// Equality on every entry, zero values included
    pub fn by_map<T: Record>(map: &BTreeMap<ColumnOf<T>, SqlValue>) -> PredicateSet<T> {
        map.iter().fold(PredicateSet::new(), |set, (column, value)| {
            set.filter(Predicate::equal(*column, value.clone()))
        })
    }

    /// Equality, substring, range and null clauses in that order, followed by
    /// ordering, eager-load, omit and scope settings
    pub fn structured<T: Record>(query: &StructuredQuery<T>) -> PredicateSet<T> {
        let mut set = PredicateSet::new();

        for (column, value) in &query.equal {
            set = set.filter(Predicate::equal(*column, value.clone()));
        }
        for (column, needle) in &query.like {
            set = set.filter(Predicate::contains(*column, needle));
        }
        for (column, (lower, upper)) in &query.between {
            set = set.filter(Predicate::between(*column, lower.clone(), upper.clone()));
        }
        for column in &query.null {
            set = set.filter(Predicate::is_null(*column));
        }
        for (column, order) in &query.order_by {
            set = set.order_by(*column, *order);
        }
        for relation in &query.preload {
            set = set.preload(*relation);
        }

        let set = set
            .omit(query.omit.iter().copied())
            .with_deleted(query.with_deleted)
            .limit(query.limit)
            .offset(query.offset);

        trace_log!(
            "Translated {} structured query into {} predicates",
            T::table_name(),
            set.predicates().len()
        );
        set
    }

    /// Equality on the primary key
    pub fn by_primary_key<T: Record>(id: T::Id) -> PredicateSet<T> {
        PredicateSet::new().filter(Predicate::equal(T::primary_key_column(), id))
    }

    /// Zero rows is `NotFound`, one row is the result and more is
    /// `MultipleResults`
    pub fn resolve_singleton<T: Record>(rows: Vec<T>) -> Result<T, CrudError> {
        let mut rows = rows.into_iter();
        match (rows.next(), rows.next()) {
            (None, _) => Err(CrudError::NotFound {
                table: T::table_name(),
            }),
            (Some(record), None) => Ok(record),
            (Some(_), Some(_)) => Err(CrudError::MultipleResults {
                table: T::table_name(),
            }),
        }
    }
}
