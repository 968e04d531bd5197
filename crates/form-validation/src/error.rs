//! Validation errors.

use thiserror::Error;

/// Errors produced while validating form input.
///
/// `Format` carries a message meant for the user. `ChecksumMismatch`
/// deliberately carries none: a well-formed identifier with the wrong
/// check digit is reported without detail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    Format(String),

    #[error("National ID check digit does not match")]
    ChecksumMismatch,
}

impl ValidationError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        ValidationError::Format(message.into())
    }

    /// Message to show next to the offending field, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ValidationError::Format(msg) => Some(msg),
            ValidationError::ChecksumMismatch => None,
        }
    }
}
