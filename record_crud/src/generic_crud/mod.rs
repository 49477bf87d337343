//! Generic CRUD store
//!
//! `GenericCrud` implements `CrudStore` for any record type over any executor.

pub mod core;
pub mod operations;

#[cfg(test)]
mod tests;

pub use self::core::GenericCrud;
