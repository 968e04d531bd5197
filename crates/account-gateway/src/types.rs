//! Profile record and the result envelope returned by every gateway operation.

use crate::error::AccountError;
use form_validation::RegistrationInput;
use serde::{Deserialize, Serialize};

/// A user profile row, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub name: String,
    pub national_id: String,
    pub program: String,
    pub phone: String,
    pub email: String,
}

impl From<&RegistrationInput> for AccountProfile {
    fn from(input: &RegistrationInput) -> Self {
        Self {
            name: input.name.clone(),
            national_id: input.national_id.to_string(),
            program: input.program.clone(),
            phone: input.phone.clone(),
            email: input.email.clone(),
        }
    }
}

/// Uniform outcome of a gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AccountProfile>,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            profile: None,
        }
    }

    pub fn with_profile(message: impl Into<String>, profile: AccountProfile) -> Self {
        Self {
            success: true,
            message: message.into(),
            profile: Some(profile),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            profile: None,
        }
    }
}

impl From<AccountError> for OperationResult {
    fn from(e: AccountError) -> Self {
        OperationResult::failure(e.to_string())
    }
}
