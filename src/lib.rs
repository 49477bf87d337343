//! # crudhaus
//!
//! Generic create/read/update/delete helpers for PostgreSQL records, driven by
//! a typed filter/query translator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crudhaus::prelude::*;
//!
//! #[model]
//! #[table(name = "users")]
//! pub struct User {
//!     #[primary_key]
//!     pub id: i64,
//!     pub name: String,
//!     pub age: Option<i32>,
//!     #[created_at]
//!     pub created_at: Option<DateTime<Utc>>,
//!     #[updated_at]
//!     pub updated_at: Option<DateTime<Utc>>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "crudhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let crudhaus = Crudhaus::new(config).await?;
//!     let users = crudhaus.crud::<User>();
//!
//!     let created = users
//!         .create(User { name: "John Doe".to_string(), ..Default::default() }, &[])
//!         .await?;
//!
//!     let found = users
//!         .smart_query(&StructuredQuery::new().like(UserColumn::Name, "Doe"))
//!         .await?;
//!     println!("Created user {} and found {} matches", created.id, found.len());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::Crudhaus;
pub use errors::CrudhausError;

// Re-export centralized config
pub use config::{AppConfig, CrudConfig, DatabaseConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use record_crud;
pub use record_derive;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
