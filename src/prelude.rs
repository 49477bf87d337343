//! Convenience re-exports for common crudhaus usage
//!
//! # Example
//!
//! ```rust
//! use crudhaus::prelude::*;
//!
//! // Records, stores, queries and config are now in scope
//! ```

// Core crudhaus components
pub use crate::core::Crudhaus;
pub use crate::errors::CrudhausError;

// Re-export centralized config
pub use config::{AppConfig, CrudConfig, DatabaseConfig};

// Re-export commonly used record-crud types for convenience
pub use record_crud::prelude::*;

// Re-export record_crud module for macro-generated code
pub use record_crud;

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;
