//! PostgreSQL executor

use super::{DeleteMode, Executor};
use crate::errors::CrudError;
use crate::query::{PredicateSet, SqlGenerator};
use crate::traits::{ColumnOf, Record};
use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::{PgPool, Postgres, Row};
use type_mapping::SqlValue;

/// Executor backed by a `sqlx` connection pool
#[derive(Clone, Debug)]
pub struct PgExecutor {
    pool: PgPool,
    log_statements: bool,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            log_statements: false,
        }
    }

    /// Log every statement at INFO instead of DEBUG
    pub fn with_statement_logging(mut self, enabled: bool) -> Self {
        self.log_statements = enabled;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn log_statement(&self, kind: &str, table: &str, sql: &str, params: usize) {
        if self.log_statements {
            tracing::info!("[{}] Table: {} SQL: {} params count: {}", kind, table, sql, params);
        } else {
            tracing::debug!("[{}] Table: {} SQL: {} params count: {}", kind, table, sql, params);
        }
    }
}

// Shared parameter binding for `Query` and `QueryAs`
macro_rules! bind_sql_value {
    ($query:expr, $param:expr) => {
        match $param {
            SqlValue::Null => $query.bind(Option::<String>::None),
            SqlValue::Text(s) => $query.bind(s),
            SqlValue::SmallInt(i) => $query.bind(i),
            SqlValue::Integer(i) => $query.bind(i),
            SqlValue::BigInt(i) => $query.bind(i),
            SqlValue::Float(f) => $query.bind(f),
            SqlValue::Boolean(b) => $query.bind(b),
            SqlValue::Uuid(u) => $query.bind(u),
            SqlValue::Timestamp(ts) => $query.bind(ts),
            SqlValue::Json(v) => $query.bind(v),
        }
    };
}

fn bind_record_params<'q, T: Record>(
    mut query: sqlx::query::QueryAs<'q, Postgres, T, PgArguments>,
    params: Vec<SqlValue>,
) -> sqlx::query::QueryAs<'q, Postgres, T, PgArguments> {
    for param in params {
        query = bind_sql_value!(query, param);
    }
    query
}

fn bind_raw_params<'q>(
    mut query: sqlx::query::Query<'q, Postgres, PgArguments>,
    params: Vec<SqlValue>,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    for param in params {
        query = bind_sql_value!(query, param);
    }
    query
}

#[async_trait]
impl Executor for PgExecutor {
    async fn select<T: Record>(&self, set: &PredicateSet<T>) -> Result<Vec<T>, CrudError> {
        let (sql, params) = SqlGenerator::select(set);
        self.log_statement("SELECT", T::table_name(), &sql, params.len());

        bind_record_params(sqlx::query_as::<_, T>(&sql), params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CrudError::execution(T::table_name(), "select", e))
    }

    async fn count<T: Record>(&self, set: &PredicateSet<T>) -> Result<i64, CrudError> {
        let (sql, params) = SqlGenerator::count(set);
        self.log_statement("COUNT", T::table_name(), &sql, params.len());

        let row = bind_raw_params(sqlx::query(&sql), params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CrudError::execution(T::table_name(), "count", e))?;

        row.try_get::<i64, _>("total")
            .map_err(|e| CrudError::execution(T::table_name(), "count", e))
    }

    async fn insert<T: Record>(&self, record: &T, columns: &[ColumnOf<T>]) -> Result<T, CrudError> {
        let (sql, params) = SqlGenerator::insert(record, columns);
        self.log_statement("INSERT", T::table_name(), &sql, params.len());

        bind_record_params(sqlx::query_as::<_, T>(&sql), params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CrudError::execution(T::table_name(), "insert", e))
    }

    async fn update<T: Record>(
        &self,
        set: &PredicateSet<T>,
        assignments: &[(ColumnOf<T>, SqlValue)],
    ) -> Result<u64, CrudError> {
        let Some((sql, params)) = SqlGenerator::update(set, assignments) else {
            tracing::debug!("[UPDATE] Table: {} nothing to set, skipped", T::table_name());
            return Ok(0);
        };
        self.log_statement("UPDATE", T::table_name(), &sql, params.len());

        let result = bind_raw_params(sqlx::query(&sql), params)
            .execute(&self.pool)
            .await
            .map_err(|e| CrudError::execution(T::table_name(), "update", e))?;

        Ok(result.rows_affected())
    }

    async fn delete<T: Record>(
        &self,
        set: &PredicateSet<T>,
        mode: DeleteMode,
    ) -> Result<u64, CrudError> {
        let (sql, params) = SqlGenerator::delete(set, mode);
        self.log_statement("DELETE", T::table_name(), &sql, params.len());

        let result = bind_raw_params(sqlx::query(&sql), params)
            .execute(&self.pool)
            .await
            .map_err(|e| CrudError::execution(T::table_name(), "delete", e))?;

        Ok(result.rows_affected())
    }
}
