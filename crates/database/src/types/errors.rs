//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("database migration error: {0}")]
    Migration(String),

    /// Raw driver error from query execution, propagated untranslated.
    #[error("database query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("unknown filter column: {0}")]
    UnknownColumn(String),

    #[error("unknown ordering column: {0}")]
    UnknownOrdering(String),
}
