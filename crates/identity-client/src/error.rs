//! Identity client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status. `message` is the
    /// human-readable text the service supplied, when there was one.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl IdentityError {
    /// HTTP status reported by the service, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            IdentityError::Api { status, .. } => Some(*status),
            IdentityError::Http(e) => e.status().map(|s| s.as_u16()),
            IdentityError::Json(_) => None,
        }
    }
}
