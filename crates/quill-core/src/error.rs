//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// A post that exists but fails the publish gate for the current viewer is
/// reported as `NotFound`, identical to a missing row, so unpublished
/// content cannot be enumerated.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type}")]
    NotFound { entity_type: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
