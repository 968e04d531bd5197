//! The capability surface the gateway needs from the identity service.

use async_trait::async_trait;
use identity_client::{IdentityClient, IdentityError};

#[cfg(test)]
use mockall::automock;

/// Operations consumed from the hosted identity and row service.
///
/// Anything that can create identities, check credentials, adopt tokens and
/// read or write single rows can back the gateway.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn create_identity(&self, email: &str, password: &str) -> Result<(), IdentityError>;

    async fn authenticate(&self, email: &str, password: &str) -> Result<(), IdentityError>;

    async fn establish_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), IdentityError>;

    async fn insert_row(&self, table: &str, record: serde_json::Value) -> Result<(), IdentityError>;

    async fn query_single_row(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<serde_json::Value, IdentityError>;
}

#[async_trait]
impl IdentityService for IdentityClient {
    async fn create_identity(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        self.sign_up(email, password).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        self.sign_in_with_password(email, password).await.map(|_| ())
    }

    async fn establish_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), IdentityError> {
        self.set_session(access_token, refresh_token).await.map(|_| ())
    }

    async fn insert_row(&self, table: &str, record: serde_json::Value) -> Result<(), IdentityError> {
        self.insert(table, &serde_json::Value::Array(vec![record])).await
    }

    async fn query_single_row(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<serde_json::Value, IdentityError> {
        self.select_single(table, column, value).await
    }
}
