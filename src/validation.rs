//! Explicit request body validation.
//!
//! Deserialization only checks the shape of a body. Rules that serde cannot
//! express live here and run through the [`Validate`] trait, which
//! [`ValidatedJson`](crate::handlers::ValidatedJson) calls before any handler
//! logic sees the value.

use crate::error::{AppError, AppResult};
use crate::models::HoneypotMessageRequest;

// =============================================================================
// Validation Constants
// =============================================================================

/// Minimum length (in characters) of a honeypot message.
pub const MIN_MESSAGE_LENGTH: usize = 1;

/// A request body that carries its own validation rules.
pub trait Validate {
    /// Check the value, returning `AppError::Validation` on the first violation.
    fn validate(&self) -> AppResult<()>;
}

impl Validate for HoneypotMessageRequest {
    fn validate(&self) -> AppResult<()> {
        validate_message(&self.message)
    }
}

/// Validate a honeypot message string.
///
/// Rules:
/// - Must contain at least one character
///
/// Whitespace is not trimmed: `" "` is a valid message.
pub fn validate_message(message: &str) -> AppResult<()> {
    if message.chars().count() < MIN_MESSAGE_LENGTH {
        return Err(AppError::Validation(format!(
            "message: String should have at least {MIN_MESSAGE_LENGTH} character"
        )));
    }

    Ok(())
}
