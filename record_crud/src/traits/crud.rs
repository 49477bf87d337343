//! CRUD operation trait
//!
//! Implemented by `GenericCrud` for every record/executor pair.

use crate::errors::CrudError;
use crate::query::StructuredQuery;
use crate::traits::record::{ColumnOf, IdOf, Record};
use async_trait::async_trait;
use std::collections::BTreeMap;
use type_mapping::SqlValue;

/// Common create/read/update/delete operations over one record type
#[async_trait]
pub trait CrudStore: Send + Sync {
    /// The record type this store persists
    type Model: Record;

    /// Insert a record, leaving out the write-omit set and a zero primary key
    async fn create(
        &self,
        data: Self::Model,
        omit: &[ColumnOf<Self::Model>],
    ) -> Result<Self::Model, CrudError>;

    /// Return the first record matching the example, creating it when none does
    async fn get_or_create(
        &self,
        data: Self::Model,
        omit: &[ColumnOf<Self::Model>],
    ) -> Result<Self::Model, CrudError>;

    /// Get a record by its primary key
    async fn get_by_id(&self, id: IdOf<Self::Model>) -> Result<Self::Model, CrudError>;

    /// List records matching the non-zero fields of `example`
    async fn query(
        &self,
        example: &Self::Model,
        omit: &[ColumnOf<Self::Model>],
    ) -> Result<Vec<Self::Model>, CrudError>;

    /// Exactly one record matching the non-zero fields of `example`
    async fn query_one(
        &self,
        example: &Self::Model,
        omit: &[ColumnOf<Self::Model>],
    ) -> Result<Self::Model, CrudError>;

    /// List records equal to every entry of `map`, zero values included
    async fn query_map(
        &self,
        map: &BTreeMap<ColumnOf<Self::Model>, SqlValue>,
    ) -> Result<Vec<Self::Model>, CrudError>;

    async fn query_map_one(
        &self,
        map: &BTreeMap<ColumnOf<Self::Model>, SqlValue>,
    ) -> Result<Self::Model, CrudError>;

    /// List records matching a structured query, with eager-loading applied
    async fn smart_query(
        &self,
        query: &StructuredQuery<Self::Model>,
    ) -> Result<Vec<Self::Model>, CrudError>;

    async fn smart_query_one(
        &self,
        query: &StructuredQuery<Self::Model>,
    ) -> Result<Self::Model, CrudError>;

    /// Count records matching a structured query
    async fn count(&self, query: &StructuredQuery<Self::Model>) -> Result<i64, CrudError>;

    /// Set one column of the record identified by `record`'s primary key
    async fn update_field(
        &self,
        record: &Self::Model,
        column: ColumnOf<Self::Model>,
        value: SqlValue,
    ) -> Result<u64, CrudError>;

    /// Write the non-zero fields of `record` by primary key
    async fn update(
        &self,
        record: &Self::Model,
        omit: &[ColumnOf<Self::Model>],
    ) -> Result<u64, CrudError>;

    /// Write explicit values, zero included, by primary key
    async fn update_map(
        &self,
        record: &Self::Model,
        map: &BTreeMap<ColumnOf<Self::Model>, SqlValue>,
    ) -> Result<u64, CrudError>;

    /// Delete by primary key; soft when the record type supports it
    async fn delete(&self, record: &Self::Model) -> Result<bool, CrudError>;

    /// Hard delete by primary key
    async fn delete_permanently(&self, record: &Self::Model) -> Result<bool, CrudError>;
}
