//! Domain error types for item validation.

use thiserror::Error;

/// Domain-specific errors for item field rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Email address does not match the accepted format.
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },

    /// Status is outside the known vocabulary.
    #[error("invalid status: {status}")]
    InvalidStatus { status: String },

    /// A required field is empty or missing.
    #[error("missing required field: {field}")]
    MissingField { field: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
