use thiserror::Error;
use type_mapping::ConversionError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum CrudError {
    #[error("Not found: no {table} record matched")]
    NotFound { table: &'static str },

    #[error("Multiple results: more than one {table} record matched a single-record lookup")]
    MultipleResults { table: &'static str },

    #[error("Database error during {operation} on {table}: {source}")]
    Execution {
        table: &'static str,
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Validation error: {operation} on {table} requires a non-zero primary key")]
    MissingPrimaryKey {
        table: &'static str,
        operation: &'static str,
    },

    #[error("Conversion error on {table}.{column}: {source}")]
    Conversion {
        table: &'static str,
        column: &'static str,
        #[source]
        source: ConversionError,
    },

    #[error("Relation error: cannot load {relation} for {table}: {message}")]
    Relation {
        table: &'static str,
        relation: &'static str,
        message: String,
    },
}

impl CrudError {
    pub fn execution(
        table: &'static str,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Execution {
            table,
            operation,
            source: source.into(),
        }
    }

    pub fn conversion(table: &'static str, column: &'static str, source: ConversionError) -> Self {
        Self::Conversion {
            table,
            column,
            source,
        }
    }

    pub fn relation(
        table: &'static str,
        relation: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Relation {
            table,
            relation,
            message: message.into(),
        }
    }

    pub fn missing_primary_key(table: &'static str, operation: &'static str) -> Self {
        Self::MissingPrimaryKey { table, operation }
    }

    /// True for the "no record matched" outcome of a single-record lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_multiple_results(&self) -> bool {
        matches!(self, Self::MultipleResults { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(CrudError::NotFound { table: "users" }.is_not_found());
        assert!(!CrudError::NotFound { table: "users" }.is_multiple_results());
        assert!(CrudError::MultipleResults { table: "users" }.is_multiple_results());
        assert!(!CrudError::missing_primary_key("users", "update").is_not_found());
    }

    #[test]
    fn test_execution_keeps_source() {
        let err = CrudError::execution(
            "users",
            "select",
            std::io::Error::new(std::io::ErrorKind::Other, "connection reset"),
        );
        assert_eq!(
            err.to_string(),
            "Database error during select on users: connection reset"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
