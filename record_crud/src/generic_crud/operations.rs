//! CRUD operations for `GenericCrud`

use super::core::GenericCrud;
use crate::errors::CrudError;
use crate::executor::{DeleteMode, Executor};
use crate::query::{SortOrder, StructuredQuery, Translator};
use crate::traits::{ColumnOf, CrudStore, IdOf, Record};
use async_trait::async_trait;
use std::collections::BTreeMap;
use type_mapping::SqlValue;

#[async_trait]
impl<T, E> CrudStore for GenericCrud<T, E>
where
    T: Record,
    E: Executor,
{
    type Model = T;

    async fn create(&self, data: T, omit: &[ColumnOf<T>]) -> Result<T, CrudError> {
        let columns = self.insert_columns(&data, omit);
        debug_log!("[CREATE] Table: {} columns: {:?}", T::table_name(), columns);
        self.executor.insert(&data, &columns).await
    }

    async fn get_or_create(&self, data: T, omit: &[ColumnOf<T>]) -> Result<T, CrudError> {
        let set = Translator::by_example(&data)
            .order_by(T::primary_key_column(), SortOrder::Asc)
            .limit(Some(1));

        match self.executor.select(&set).await?.into_iter().next() {
            Some(existing) => Ok(existing),
            None => self.create(data, omit).await,
        }
    }

    async fn get_by_id(&self, id: IdOf<T>) -> Result<T, CrudError> {
        self.fetch_one(Translator::by_primary_key(id)).await
    }

    async fn query(&self, example: &T, omit: &[ColumnOf<T>]) -> Result<Vec<T>, CrudError> {
        let set = Translator::by_example(example).omit(omit.iter().copied());
        self.fetch(set).await
    }

    async fn query_one(&self, example: &T, omit: &[ColumnOf<T>]) -> Result<T, CrudError> {
        let set = Translator::by_example(example).omit(omit.iter().copied());
        self.fetch_one(set).await
    }

    async fn query_map(&self, map: &BTreeMap<ColumnOf<T>, SqlValue>) -> Result<Vec<T>, CrudError> {
        self.fetch(Translator::by_map(map)).await
    }

    async fn query_map_one(&self, map: &BTreeMap<ColumnOf<T>, SqlValue>) -> Result<T, CrudError> {
        self.fetch_one(Translator::by_map(map)).await
    }

    async fn smart_query(&self, query: &StructuredQuery<T>) -> Result<Vec<T>, CrudError> {
        self.fetch(Translator::structured(query)).await
    }

    async fn smart_query_one(&self, query: &StructuredQuery<T>) -> Result<T, CrudError> {
        self.fetch_one(Translator::structured(query)).await
    }

    async fn count(&self, query: &StructuredQuery<T>) -> Result<i64, CrudError> {
        self.executor.count(&Translator::structured(query)).await
    }

    async fn update_field(
        &self,
        record: &T,
        column: ColumnOf<T>,
        value: SqlValue,
    ) -> Result<u64, CrudError> {
        let set = self.key_set(record, "update_field")?;
        if self.write_omit(&[]).contains(&column) {
            debug_log!(
                "[UPDATE] Table: {} column {:?} is write-omitted, skipped",
                T::table_name(),
                column
            );
            return Ok(0);
        }
        self.executor.update(&set, &[(column, value)]).await
    }

    async fn update(&self, record: &T, omit: &[ColumnOf<T>]) -> Result<u64, CrudError> {
        let set = self.key_set(record, "update")?;
        let assignments = self.update_assignments(record, omit);
        debug_log!("[UPDATE] Table: {} assignments: {:?}", T::table_name(), assignments);
        self.executor.update(&set, &assignments).await
    }

    async fn update_map(
        &self,
        record: &T,
        map: &BTreeMap<ColumnOf<T>, SqlValue>,
    ) -> Result<u64, CrudError> {
        let set = self.key_set(record, "update_map")?;
        let omitted = self.write_omit(&[]);
        let assignments: Vec<_> = map
            .iter()
            .filter(|(column, _)| !omitted.contains(*column))
            .map(|(column, value)| (*column, value.clone()))
            .collect();
        self.executor.update(&set, &assignments).await
    }

    async fn delete(&self, record: &T) -> Result<bool, CrudError> {
        let set = self.key_set(record, "delete")?;
        let affected = self.executor.delete(&set, DeleteMode::Soft).await?;
        Ok(affected > 0)
    }

    async fn delete_permanently(&self, record: &T) -> Result<bool, CrudError> {
        let set = self.key_set(record, "delete_permanently")?.with_deleted(true);
        let affected = self.executor.delete(&set, DeleteMode::Hard).await?;
        Ok(affected > 0)
    }
}
