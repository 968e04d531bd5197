//! Client for a hosted identity service with an attached row store.
//!
//! Covers the handful of endpoints the signup portal needs: password
//! sign-up and sign-in, adopting a session from redirect tokens, inserting
//! rows and fetching a single row by an equality filter.

mod client;
mod error;
mod types;

pub use client::IdentityClient;
pub use error::IdentityError;
pub use types::{Session, User};
