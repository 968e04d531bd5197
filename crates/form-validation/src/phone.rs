//! Mobile phone number pattern.

use crate::error::ValidationError;

/// Country and mobile prefix every accepted number starts with.
pub const MOBILE_PREFIX: &str = "+569";

/// Number of subscriber digits after the prefix.
pub const SUBSCRIBER_DIGITS: usize = 8;

pub const MSG_INVALID_PHONE: &str = "Invalid phone number. Use +569XXXXXXXX";

/// Check that `phone` is exactly `+569` followed by eight digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone
        .strip_prefix(MOBILE_PREFIX)
        .map(|rest| rest.len() == SUBSCRIBER_DIGITS && rest.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

/// Like [`is_valid_phone`] but returns a format error carrying the user message.
pub fn check_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::format(MSG_INVALID_PHONE))
    }
}
