//! Gateway error types.

use thiserror::Error;

/// Why an account operation failed.
///
/// The `Display` text is what ends up in the status line, so variants that
/// must not leak service detail render a fixed message.
#[derive(Debug, Error)]
pub enum AccountError {
    /// The service rejected the sign-up; its message is passed through.
    #[error("{0}")]
    Service(String),

    /// The service rejected the credentials. Which part was wrong is not disclosed.
    #[error("Incorrect email or password.")]
    InvalidCredentials,

    /// The profile row could not be written after the identity was created.
    #[error("Failed to save profile: {0}")]
    ProfileSave(String),

    /// The profile row could not be read after a successful sign-in.
    #[error("Failed to load user profile.")]
    ProfileLoad,

    /// The redirect fragment carried an access token but the session could not be built.
    #[error("Failed to restore session: {0}")]
    Redirect(String),
}

/// Session marker storage errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
