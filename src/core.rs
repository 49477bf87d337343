//! Core crudhaus functionality
//!
//! This module contains the main `Crudhaus` struct, which owns the connection
//! pool and hands out typed CRUD stores over it.

use record_crud::{ColumnOf, GenericCrud, PgExecutor, Record};
use sqlx::PgPool;
use std::time::Duration;

use crate::errors::CrudhausError;
use config::{AppConfig, DatabaseConfig};

/// Entry point that manages the database connection and creates CRUD stores
#[derive(Clone, Debug)]
pub struct Crudhaus {
    executor: PgExecutor,
}

impl Crudhaus {
    /// Create new Crudhaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, CrudhausError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        tracing::info!(
            "Connected to PostgreSQL at {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        Ok(Self::from_pool(pool))
    }

    /// Connect using a loaded application config, honoring its `[crud]` section
    pub async fn from_config(config: &AppConfig) -> Result<Self, CrudhausError> {
        let crudhaus = Self::new(config.database.clone()).await?;
        Ok(Self {
            executor: crudhaus
                .executor
                .with_statement_logging(config.crud.log_statements),
        })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            executor: PgExecutor::new(pool),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        self.executor.pool()
    }

    pub fn executor(&self) -> &PgExecutor {
        &self.executor
    }

    /// CRUD store for `T`
    pub fn crud<T: Record>(&self) -> GenericCrud<T, PgExecutor> {
        crate::debug_log!("Creating CRUD store for table {}", T::table_name());
        GenericCrud::new(self.executor.clone())
    }

    /// CRUD store for `T` whose writes always leave out `omit`
    pub fn crud_with_omit<T: Record>(
        &self,
        omit: impl IntoIterator<Item = ColumnOf<T>>,
    ) -> GenericCrud<T, PgExecutor> {
        crate::debug_log!("Creating CRUD store for table {} with fixed omit", T::table_name());
        GenericCrud::with_omit(self.executor.clone(), omit)
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), CrudhausError> {
        sqlx::query("SELECT 1").fetch_one(self.pool()).await?;
        Ok(())
    }
}
