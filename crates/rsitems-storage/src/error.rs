//! Storage error types.

use thiserror::Error;

use crate::traits::ItemId;

/// Storage-specific errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Item not found.
    #[error("item not found: {id}")]
    ItemNotFound { id: ItemId },

    /// Database connection error.
    #[error("database connection error: {message}")]
    ConnectionError { message: String },

    /// Database query error.
    #[error("database query error: {message}")]
    QueryError { message: String },

    /// Invalid input error.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Internal error.
    #[error("internal storage error: {message}")]
    InternalError { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
