//! Shared types and result types for the database layer

pub mod errors;

pub use errors::DatabaseError;

/// Result alias used throughout the repositories and services.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
