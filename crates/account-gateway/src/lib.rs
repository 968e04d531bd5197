//! Account gateway for the signup portal.
//!
//! Wraps the hosted identity service behind the [`IdentityService`]
//! capability trait and turns its responses into [`OperationResult`]
//! envelopes the form layer can render directly.

mod error;
mod gateway;
pub mod redirect;
mod service;
mod session;
mod types;

pub use error::{AccountError, SessionError};
pub use gateway::{
    AccountGateway, DEFAULT_PROFILE_TABLE, MSG_REGISTERED, MSG_SESSION_RESTORED, MSG_SIGNED_IN,
};
pub use service::IdentityService;
pub use session::{SessionStore, CURRENT_USER_KEY};
pub use types::{AccountProfile, OperationResult};
