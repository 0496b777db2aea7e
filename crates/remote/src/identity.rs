//! Identity service surface: accounts and access tokens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use civicreport_core::signup::NewAccount;
use civicreport_core::types::UserId;

use crate::error::BackendError;

/// Authenticated identity as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

/// A live access token together with the identity it belongs to. Tokens are
/// opaque to this code; only the backend can mint or verify them.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Account and session operations against the identity service.
///
/// Implementations must be cheap to call concurrently; the service shares
/// one instance across all in-flight requests.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account. The caller is expected to have validated
    /// `account` first; the backend still applies its own rules and may
    /// reject (e.g. an already-registered email).
    async fn sign_up(&self, account: &NewAccount) -> Result<(), BackendError>;

    /// Exchange credentials for an access token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError>;

    /// Revoke an access token upstream.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    /// Reachability probe against the identity service.
    async fn health_check(&self) -> Result<(), BackendError>;
}
