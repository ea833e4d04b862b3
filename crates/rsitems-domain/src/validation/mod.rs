//! Item field validation.
//!
//! Validates the fields callers may set on an item:
//! - `email` must match a conventional address format
//! - `status` must come from the known vocabulary
//! - `name` must be non-empty
//!
//! Validation runs at the service boundary (create/update); the batch
//! pipeline writes [`PROCESSED_STATUS`] directly and does not re-validate.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DomainError, DomainResult};

/// Status marker written by the batch processing pipeline.
pub const PROCESSED_STATUS: &str = "PROCESSED";

/// The full status vocabulary accepted on create/update.
pub const ITEM_STATUSES: [&str; 3] = ["NEW", "ACTIVE", PROCESSED_STATUS];

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Returns true if `status` is part of the known vocabulary.
pub fn is_known_status(status: &str) -> bool {
    ITEM_STATUSES.contains(&status)
}

/// Validates an email address.
///
/// The pattern alone accepts consecutive dots in the domain part
/// ("user@domain..com"), which real mail systems reject, so that case is
/// checked separately.
pub fn validate_email(email: &str) -> DomainResult<()> {
    if email.is_empty() {
        return Err(DomainError::MissingField {
            field: "email".to_string(),
        });
    }
    if !EMAIL_REGEX.is_match(email) || email.contains("..") {
        return Err(DomainError::InvalidEmail {
            email: email.to_string(),
        });
    }
    Ok(())
}

/// Validates a status value against the known vocabulary.
pub fn validate_status(status: &str) -> DomainResult<()> {
    if status.is_empty() {
        return Err(DomainError::MissingField {
            field: "status".to_string(),
        });
    }
    if !is_known_status(status) {
        return Err(DomainError::InvalidStatus {
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Validates the caller-settable fields of an item together.
pub fn validate_item_fields(name: &str, status: &str, email: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::MissingField {
            field: "name".to_string(),
        });
    }
    validate_status(status)?;
    validate_email(email)?;
    Ok(())
}
