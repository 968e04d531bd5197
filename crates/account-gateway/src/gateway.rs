//! Account operations on top of an [`IdentityService`].

use crate::error::AccountError;
use crate::redirect::{parse_fragment, FragmentTokens};
use crate::service::IdentityService;
use crate::types::{AccountProfile, OperationResult};
use form_validation::{LoginInput, RegistrationInput};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const MSG_REGISTERED: &str = "Registration successful. Check your email to confirm your account.";
pub const MSG_SIGNED_IN: &str = "Signed in.";
pub const MSG_SESSION_RESTORED: &str = "Session restored.";

/// Default table holding profile rows.
pub const DEFAULT_PROFILE_TABLE: &str = "users";

/// Column profiles are keyed by.
const PROFILE_KEY_COLUMN: &str = "email";

/// Registration, login and session restore.
///
/// Built once at startup around a shared service handle. Every operation
/// reports its outcome as an [`OperationResult`]; nothing is retried.
#[derive(Clone)]
pub struct AccountGateway {
    service: Arc<dyn IdentityService>,
    profile_table: String,
}

impl AccountGateway {
    pub fn new(service: Arc<dyn IdentityService>) -> Self {
        Self::with_profile_table(service, DEFAULT_PROFILE_TABLE)
    }

    pub fn with_profile_table(
        service: Arc<dyn IdentityService>,
        profile_table: impl Into<String>,
    ) -> Self {
        Self {
            service,
            profile_table: profile_table.into(),
        }
    }

    pub fn profile_table(&self) -> &str {
        &self.profile_table
    }

    /// Create the identity, then the profile row.
    ///
    /// If the row insert fails the identity stays created without a
    /// profile; there is no compensating delete.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: &RegistrationInput) -> OperationResult {
        match self.try_register(input).await {
            Ok(()) => {
                info!("Account registered");
                OperationResult::success(MSG_REGISTERED)
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                e.into()
            }
        }
    }

    async fn try_register(&self, input: &RegistrationInput) -> Result<(), AccountError> {
        self.service
            .create_identity(&input.email, input.password())
            .await
            .map_err(|e| AccountError::Service(e.to_string()))?;

        let record = serde_json::to_value(AccountProfile::from(input))
            .map_err(|e| AccountError::ProfileSave(e.to_string()))?;

        self.service
            .insert_row(&self.profile_table, record)
            .await
            .map_err(|e| {
                warn!(
                    "Identity created for {} but profile insert failed; left without a profile",
                    input.email
                );
                AccountError::ProfileSave(e.to_string())
            })
    }

    /// Authenticate, then load the profile row for the email.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: &LoginInput) -> OperationResult {
        match self.try_login(input).await {
            Ok(profile) => {
                info!("Signed in");
                OperationResult::with_profile(MSG_SIGNED_IN, profile)
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                e.into()
            }
        }
    }

    async fn try_login(&self, input: &LoginInput) -> Result<AccountProfile, AccountError> {
        self.service
            .authenticate(&input.email, input.password())
            .await
            .map_err(|e| {
                // Logged, never shown: the user only learns the pair was wrong.
                warn!("Authentication rejected: {}", e);
                AccountError::InvalidCredentials
            })?;

        let row = self
            .service
            .query_single_row(&self.profile_table, PROFILE_KEY_COLUMN, &input.email)
            .await
            .map_err(|e| {
                warn!("Profile lookup failed: {}", e);
                AccountError::ProfileLoad
            })?;

        serde_json::from_value(row).map_err(|e| {
            warn!("Profile row did not match the expected shape: {}", e);
            AccountError::ProfileLoad
        })
    }

    /// Adopt the session carried by a confirmation redirect, if any.
    ///
    /// Returns `None` when the fragment has no token marker. Whenever a
    /// result is returned the caller navigates to the post-login view,
    /// whether or not the session was established.
    #[instrument(skip(self, fragment))]
    pub async fn restore_session_from_redirect(&self, fragment: &str) -> Option<OperationResult> {
        let tokens = match parse_fragment(fragment) {
            FragmentTokens::Absent => return None,
            FragmentTokens::Incomplete(reason) => {
                warn!("Ignoring redirect tokens: {}", reason);
                return Some(AccountError::Redirect(reason.to_string()).into());
            }
            FragmentTokens::Present(tokens) => tokens,
        };

        let result = self
            .service
            .establish_session(
                tokens.access_token.expose_secret(),
                tokens.refresh_token.expose_secret(),
            )
            .await;

        Some(match result {
            Ok(()) => {
                info!("Session restored from redirect");
                OperationResult::success(MSG_SESSION_RESTORED)
            }
            Err(e) => {
                warn!("Could not establish session from redirect: {}", e);
                AccountError::Redirect(e.to_string()).into()
            }
        })
    }
}
