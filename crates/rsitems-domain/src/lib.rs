//! rsitems-domain: Domain rules for item records
//!
//! This crate holds the business rules that are independent of storage and
//! transport:
//! - Status vocabulary, including the processed marker applied by the batch
//!   pipeline
//! - Field validation (email format, status vocabulary, required fields)
//! - Domain error type

pub mod error;
pub mod validation;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use validation::{
    is_known_status, validate_email, validate_item_fields, validate_status, ITEM_STATUSES,
    PROCESSED_STATUS,
};
