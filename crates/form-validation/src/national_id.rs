//! National ID (RUT-style) normalization and check digit validation.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weights applied to the digits, least significant first, repeating.
const WEIGHTS: [u32; 6] = [2, 3, 4, 5, 6, 7];

pub const MSG_REQUIRED: &str = "A national ID is required.";
pub const MSG_MISSING_SEPARATOR: &str = "The national ID must contain a hyphen separator (-).";
pub const MSG_NON_NUMERIC: &str = "The part before the hyphen must contain only digits.";
pub const MSG_INVALID_CHECK: &str = "Invalid check digit: use a single digit or K.";

/// Outcome of validating a national ID, as shown to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }
}

impl From<Result<NationalId, ValidationError>> for ValidationResult {
    fn from(result: Result<NationalId, ValidationError>) -> Self {
        match result {
            Ok(_) => ValidationResult::ok(),
            Err(e) => ValidationResult {
                valid: false,
                message: e.user_message().map(String::from),
            },
        }
    }
}

/// A national ID whose check digit has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NationalId {
    body: String,
    check: char,
}

impl NationalId {
    /// Numeric part, without separators.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Check symbol: a digit or `K`.
    pub fn check(&self) -> char {
        self.check
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.body, self.check)
    }
}

/// Strip dots and whitespace and upper-case the result.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Compute the check symbol for a string of ASCII digits.
///
/// Non-digit characters are skipped; callers validate the body first.
pub fn check_symbol(digits: &str) -> char {
    let sum: u32 = digits
        .bytes()
        .rev()
        .filter(u8::is_ascii_digit)
        .zip(WEIGHTS.iter().cycle())
        .fold(0, |acc, (d, w)| (acc + u32::from(d - b'0') * w) % 11);

    match (11 - sum) % 11 {
        10 => 'K',
        s => char::from_digit(s, 10).unwrap_or('0'),
    }
}

/// Compute the check symbol for a numeric body.
pub fn check_symbol_for(number: u64) -> char {
    check_symbol(&number.to_string())
}

/// Parse and verify a national ID of the form `<digits>-<digit|K>`.
///
/// Anything after a second hyphen is dropped.
pub fn check_national_id(raw: &str) -> Result<NationalId, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::format(MSG_REQUIRED));
    }

    let cleaned = clean(raw);
    let (body, rest) = cleaned
        .split_once('-')
        .ok_or_else(|| ValidationError::format(MSG_MISSING_SEPARATOR))?;
    // Only the segment up to a second hyphen is the check symbol; the rest is ignored.
    let check = rest.split_once('-').map_or(rest, |(check, _)| check);

    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::format(MSG_NON_NUMERIC));
    }

    let mut chars = check.chars();
    let supplied = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() || c == 'K' => c,
        _ => return Err(ValidationError::format(MSG_INVALID_CHECK)),
    };

    if check_symbol(body) != supplied {
        return Err(ValidationError::ChecksumMismatch);
    }

    Ok(NationalId {
        body: body.to_string(),
        check: supplied,
    })
}

/// Validate a national ID and report the result as a `ValidationResult`.
///
/// Format problems carry a message; a check digit mismatch does not.
pub fn validate_national_id(raw: &str) -> ValidationResult {
    check_national_id(raw).into()
}
