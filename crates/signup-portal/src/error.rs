//! Application error types.

use thiserror::Error;

/// Startup errors. Form submissions never produce these; their failures
/// are rendered into the view instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Identity service error: {0}")]
    Identity(#[from] identity_client::IdentityError),

    #[error("Session error: {0}")]
    Session(#[from] account_gateway::SessionError),

    #[error("Console error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
