//! Error types for collaborator operations

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures raised by the identity, persistence, credit, and checkout
/// collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No authenticated user for an operation that requires one
    #[error("user must be authenticated")]
    Unauthenticated,

    /// The record exists but belongs to a different user
    #[error("unauthorized access")]
    Unauthorized,

    /// No record with the given id
    #[error("analysis not found: {0}")]
    NotFound(String),

    /// Credit balance too low for the requested deduction
    #[error("insufficient credits: {available} available, {required} required")]
    InsufficientCredits { available: i64, required: i64 },

    /// Checkout requested for a package that does not exist
    #[error("unknown credit package: {0}")]
    UnknownPackage(String),

    /// Backend-specific failure
    #[error("storage backend error: {0}")]
    Backend(String),
}
