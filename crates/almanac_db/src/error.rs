//! Error types for the storage layer.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for storage operations.
pub type DbResult<T> = Result<T, DbError>;

/// Storage error types.
#[derive(Debug, Error, Diagnostic)]
pub enum DbError {
    /// SQLite/sqlx error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// IO error (for filesystem operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database file does not exist
    #[error("Database file not found: {path}")]
    #[diagnostic(help("Create the calendar first, or check the path"))]
    MissingDatabase { path: String },

    /// Opened file is missing one of the expected tables
    #[error("Schema mismatch: missing table '{table}'")]
    #[diagnostic(help("The file is not an almanac calendar database"))]
    SchemaMismatch { table: String },

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Invalid data
    #[error("Invalid data: {message}")]
    InvalidData { message: String },
}

impl DbError {
    /// Create a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a missing database error.
    pub fn missing_database(path: impl Into<String>) -> Self {
        Self::MissingDatabase { path: path.into() }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(table: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
        }
    }
}
