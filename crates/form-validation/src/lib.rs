//! Client-side validation for the signup portal.
//!
//! Nothing in this crate talks to the network. Every check here runs before
//! a submission is allowed to reach the identity service.

mod error;
mod form;
pub mod national_id;
pub mod phone;

pub use error::ValidationError;
pub use form::{
    all_present, FormError, LoginForm, LoginInput, RegistrationForm, RegistrationInput,
    MSG_REQUIRED_FIELDS,
};
pub use national_id::{
    check_national_id, check_symbol, validate_national_id, NationalId, ValidationResult,
};
pub use phone::{check_phone, is_valid_phone};
