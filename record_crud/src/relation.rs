//! Eager loading of has-many relations
//!
//! Generated `Record::eager_load` implementations call into this module.

use crate::errors::CrudError;
use crate::executor::Executor;
use crate::query::{Predicate, PredicateSet, SortOrder};
use crate::traits::{Column, Record};
use type_mapping::SqlValue;

/// Load the children of every parent with one `IN` select and hand each
/// parent its own group through `attach`
///
/// Children come back in primary-key order. Soft-deleted children are left out.
pub async fn load_has_many<P, C, E>(
    executor: &E,
    parents: &mut [P],
    relation: &'static str,
    foreign_key: &'static str,
    attach: fn(&mut P, Vec<C>),
) -> Result<(), CrudError>
where
    P: Record,
    C: Record,
    E: Executor,
{
    if parents.is_empty() {
        return Ok(());
    }

    let column = <C::Column as Column>::from_name(foreign_key).ok_or_else(|| {
        CrudError::relation(
            P::table_name(),
            relation,
            format!("{} has no column named {}", C::table_name(), foreign_key),
        )
    })?;

    let mut keys: Vec<SqlValue> = Vec::with_capacity(parents.len());
    for parent in parents.iter() {
        let key: SqlValue = parent.primary_key().into();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    let set = PredicateSet::<C>::new()
        .filter(Predicate::any_of(column, keys))
        .order_by(C::primary_key_column(), SortOrder::Asc);
    let children = executor.select(&set).await?;

    debug_log!(
        "Eager-loaded {} {} rows for {} {} rows",
        children.len(),
        C::table_name(),
        parents.len(),
        P::table_name()
    );

    for parent in parents.iter_mut() {
        let key: SqlValue = parent.primary_key().into();
        let group = children
            .iter()
            .filter(|child| child.value(column).sql_eq(&key))
            .cloned()
            .collect();
        attach(parent, group);
    }

    Ok(())
}
