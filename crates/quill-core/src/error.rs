//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Malformed identifier: {0}")]
    InvalidId(String),

    #[error("Entity not found")]
    NotFound,
}
