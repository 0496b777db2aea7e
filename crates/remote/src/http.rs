//! Production HTTP client for the managed backend.
//!
//! Speaks the backend's three REST surfaces -- identity (`/auth/v1`),
//! records (`/rest/v1`), and object storage (`/storage/v1`) -- using
//! [`reqwest`]. No timeouts are set here; the service's request-timeout
//! middleware bounds the whole round trip.

use async_trait::async_trait;
use serde::Deserialize;

use civicreport_core::issue::{Issue, IssueSummary, NewIssue};
use civicreport_core::signup::NewAccount;

use crate::config::BackendConfig;
use crate::data::{public_object_url, DataClient, ISSUES_COLLECTION, PHOTO_BUCKET};
use crate::error::{error_message_from_body, BackendError};
use crate::identity::{AuthSession, AuthUser, IdentityProvider};

/// Columns the progress board fetches; everything else stays server-side.
const SUMMARY_COLUMNS: &str = "id,issue_type,location,status,created_at";

/// Sort expression for list fetches.
const NEWEST_FIRST: &str = "created_at.desc";

/// HTTP client for a single managed-backend project.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Response returned by the identity service's password-grant endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    email: String,
}

impl HttpBackend {
    /// Create a new client for a backend project.
    pub fn new(config: BackendConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling when several components talk to the backend).
    pub fn with_client(client: reqwest::Client, config: BackendConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
        }
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_endpoint(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    fn storage_object_endpoint(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    /// Attach the project key to a request (anonymous surfaces).
    fn keyed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("apikey", &self.anon_key)
    }

    /// Attach the project key and a user token to a request.
    fn authed(
        &self,
        request: reqwest::RequestBuilder,
        access_token: &str,
    ) -> reqwest::RequestBuilder {
        self.keyed(request).bearer_auth(access_token)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`BackendError::Api`] carrying the status
    /// and the message extracted from the body on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_message_from_body(&body),
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), BackendError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for HttpBackend {
    /// Sends a `POST /auth/v1/signup` request. The username and phone ride
    /// along as profile metadata.
    async fn sign_up(&self, account: &NewAccount) -> Result<(), BackendError> {
        let body = serde_json::json!({
            "email": account.email,
            "password": account.password,
            "data": {
                "username": account.username,
                "phone": account.phone,
            },
        });

        let response = self
            .keyed(self.client.post(self.auth_endpoint("signup")))
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Sends a `POST /auth/v1/token?grant_type=password` request and
    /// returns the minted session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .keyed(self.client.post(self.auth_endpoint("token")))
            .query(&[("grant_type", "password")])
            .json(&body)
            .send()
            .await?;

        let token: TokenResponse = Self::parse_response(response).await?;
        Ok(AuthSession {
            access_token: token.access_token,
            user: AuthUser {
                id: token.user.id,
                email: token.user.email,
            },
        })
    }

    /// Sends a `POST /auth/v1/logout` request revoking `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self
            .authed(self.client.post(self.auth_endpoint("logout")), access_token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Sends a `GET /auth/v1/health` request.
    async fn health_check(&self) -> Result<(), BackendError> {
        let response = self
            .keyed(self.client.get(self.auth_endpoint("health")))
            .send()
            .await?;

        Self::check_status(response).await
    }
}

#[async_trait]
impl DataClient for HttpBackend {
    /// Sends a `POST /rest/v1/issues` request. `return=minimal` keeps the
    /// backend from echoing the row back.
    async fn insert_issue(
        &self,
        access_token: &str,
        issue: &NewIssue,
    ) -> Result<(), BackendError> {
        let response = self
            .authed(
                self.client.post(self.rest_endpoint(ISSUES_COLLECTION)),
                access_token,
            )
            .header("Prefer", "return=minimal")
            .json(issue)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Sends a `GET /rest/v1/issues` request for full rows, newest first.
    async fn list_issues(&self, access_token: &str) -> Result<Vec<Issue>, BackendError> {
        let response = self
            .authed(
                self.client.get(self.rest_endpoint(ISSUES_COLLECTION)),
                access_token,
            )
            .query(&[("select", "*"), ("order", NEWEST_FIRST)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Sends a `GET /rest/v1/issues` request for the board projection,
    /// newest first.
    async fn list_issue_summaries(
        &self,
        access_token: &str,
    ) -> Result<Vec<IssueSummary>, BackendError> {
        let response = self
            .authed(
                self.client.get(self.rest_endpoint(ISSUES_COLLECTION)),
                access_token,
            )
            .query(&[("select", SUMMARY_COLUMNS), ("order", NEWEST_FIRST)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Sends a `POST /storage/v1/object/issue-photos/{path}` request with
    /// the raw photo bytes as the body.
    async fn upload_photo(
        &self,
        access_token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let response = self
            .authed(
                self.client
                    .post(self.storage_object_endpoint(PHOTO_BUCKET, path)),
                access_token,
            )
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response).await
    }

    fn photo_public_url(&self, path: &str) -> String {
        public_object_url(&self.base_url, PHOTO_BUCKET, path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
