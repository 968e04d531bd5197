//! Identity service HTTP client.

use crate::error::IdentityError;
use crate::types::*;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use urlencoding::encode;

/// Accept header that makes the row endpoint return exactly one object,
/// or fail when zero or several rows match.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Client for the hosted identity service and its row API.
///
/// The project key is public but still kept in a `SecretString` so it never
/// ends up in debug output. The current session is shared between clones.
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
    anon_key: SecretString,
    session: Arc<RwLock<Option<Session>>>,
}

impl IdentityClient {
    /// Create a new client.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, IdentityError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: SecretString::new(anon_key.into()),
            session: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session, if one has been established.
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Forget the current session locally.
    pub async fn sign_out(&self) {
        self.session.write().await.take();
    }

    /// Check if the auth service is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/auth/v1/health", self.base_url))
            .header("apikey", self.anon_key.expose_secret())
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Create an identity with email and password.
    ///
    /// When the project confirms emails automatically the response already
    /// contains a session, which is kept.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        let response = self
            .authorized(self.client.post(format!("{}/auth/v1/signup", self.base_url)))
            .await
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        let body: serde_json::Value = self.handle_response(response).await?;

        if body.get("access_token").is_some() {
            let session: Session = serde_json::from_value(body)?;
            *self.session.write().await = Some(session);
            info!("Sign-up returned a session");
        } else {
            debug!("Sign-up accepted, confirmation pending");
        }

        Ok(())
    }

    /// Sign in with email and password and keep the resulting session.
    #[instrument(skip(self, password))]
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, IdentityError> {
        let response = self
            .authorized(self.client.post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url
            )))
            .await
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        let session: Session = self.handle_response(response).await?;
        *self.session.write().await = Some(session.clone());

        debug!("Signed in");
        Ok(session)
    }

    /// Adopt a session from tokens handed over by a redirect.
    ///
    /// The access token is checked against the user endpoint. If it has
    /// expired the refresh token is exchanged for a fresh session.
    #[instrument(skip(self, access_token, refresh_token))]
    pub async fn set_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, IdentityError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await?;

        let session = if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Access token rejected, exchanging refresh token");
            self.refresh(refresh_token).await?
        } else {
            let user: User = self.handle_response(response).await?;
            Session {
                access_token: SecretString::new(access_token.to_string()),
                refresh_token: SecretString::new(refresh_token.to_string()),
                token_type: Some("bearer".into()),
                expires_in: None,
                user: Some(user),
            }
        };

        *self.session.write().await = Some(session.clone());
        info!("Session established from tokens");
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, IdentityError> {
        let response = self
            .client
            .post(format!(
                "{}/auth/v1/token?grant_type=refresh_token",
                self.base_url
            ))
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(self.anon_key.expose_secret())
            .json(&RefreshTokenGrant { refresh_token })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Insert rows into a table.
    #[instrument(skip(self, rows))]
    pub async fn insert(&self, table: &str, rows: &serde_json::Value) -> Result<(), IdentityError> {
        let response = self
            .authorized(
                self.client
                    .post(format!("{}/rest/v1/{}", self.base_url, encode(table))),
            )
            .await
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response).await);
        }

        debug!("Rows inserted");
        Ok(())
    }

    /// Fetch the single row where `column` equals `value`.
    ///
    /// Fails when no row or more than one row matches.
    #[instrument(skip(self))]
    pub async fn select_single(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<serde_json::Value, IdentityError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&{}=eq.{}",
            self.base_url,
            encode(table),
            encode(column),
            encode(value)
        );

        let response = self
            .authorized(self.client.get(&url))
            .await
            .header("Accept", SINGLE_OBJECT)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Attach the project key and the best available bearer token.
    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("apikey", self.anon_key.expose_secret());
        match self.session.read().await.as_ref() {
            Some(session) => request.bearer_auth(session.access_token.expose_secret()),
            None => request.bearer_auth(self.anon_key.expose_secret()),
        }
    }

    /// Handle HTTP response, converting errors appropriately.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, IdentityError> {
        if response.status().is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(IdentityError::from)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract the service's message from a failed response.
    async fn extract_error(&self, response: Response) -> IdentityError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body
                }
            });

        warn!(status = %status, message = %message, "Identity service request failed");

        IdentityError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
