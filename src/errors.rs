//! Error types for the crudhaus crate
//!
//! This module contains the facade error; CRUD operations return
//! `record_crud::CrudError` directly.

use config::ConfigError;
use record_crud::CrudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrudhausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Crud(#[from] CrudError),
}

impl CrudhausError {
    /// True when a CRUD lookup matched no record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Crud(e) if e.is_not_found())
    }
}
