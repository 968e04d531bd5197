//! Raw form submissions and their validated counterparts.

use crate::error::ValidationError;
use crate::national_id::{check_national_id, NationalId};
use crate::phone::check_phone;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

pub const MSG_REQUIRED_FIELDS: &str = "Please fill in all fields.";

/// Why a form submission was refused, and which check refused it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{}", MSG_REQUIRED_FIELDS)]
    MissingFields,

    #[error(transparent)]
    NationalId(ValidationError),

    #[error(transparent)]
    Phone(ValidationError),
}

impl FormError {
    /// Message to show the user. `None` for a check digit mismatch.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            FormError::MissingFields => Some(MSG_REQUIRED_FIELDS),
            FormError::NationalId(e) | FormError::Phone(e) => e.user_message(),
        }
    }
}

/// Registration form exactly as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub national_id: String,
    pub program: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Login form exactly as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// A registration that passed every client-side check.
#[derive(Debug)]
pub struct RegistrationInput {
    pub name: String,
    pub national_id: NationalId,
    pub program: String,
    pub phone: String,
    pub email: String,
    pub password: SecretString,
}

/// Credentials that passed the required-field check.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: SecretString,
}

impl RegistrationInput {
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl LoginInput {
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// True if every field is non-empty after trimming.
pub fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.trim().is_empty())
}

fn require(fields: &[&str]) -> Result<(), FormError> {
    if all_present(fields) {
        Ok(())
    } else {
        Err(FormError::MissingFields)
    }
}

impl RegistrationForm {
    /// Run required-field, national ID and phone checks, in that order.
    pub fn validate(&self) -> Result<RegistrationInput, FormError> {
        require(&[
            &self.name,
            &self.national_id,
            &self.program,
            &self.phone,
            &self.email,
            &self.password,
        ])?;

        let national_id =
            check_national_id(self.national_id.trim()).map_err(FormError::NationalId)?;
        let phone = self.phone.trim();
        check_phone(phone).map_err(FormError::Phone)?;

        Ok(RegistrationInput {
            name: self.name.trim().to_string(),
            national_id,
            program: self.program.trim().to_string(),
            phone: phone.to_string(),
            email: self.email.trim().to_string(),
            password: SecretString::new(self.password.trim().to_string()),
        })
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginInput, FormError> {
        require(&[&self.email, &self.password])?;

        Ok(LoginInput {
            email: self.email.trim().to_string(),
            password: SecretString::new(self.password.trim().to_string()),
        })
    }
}
