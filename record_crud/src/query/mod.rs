//! Filter/query translation
//!
//! This module turns lookup descriptions into predicate sets and renders
//! predicate sets as SQL.

pub mod filter;
pub mod ordering;
pub mod predicate_set;
pub mod sql_generation;
pub mod structured;
pub mod translator;

#[cfg(test)]
mod tests;

pub use filter::{escape_like, like_matches, Predicate};
pub use ordering::SortOrder;
pub use predicate_set::PredicateSet;
pub use sql_generation::SqlGenerator;
pub use structured::StructuredQuery;
pub use translator::Translator;
