//! Handlers for the `/auth` resource (sign-up, sign-in, sign-out).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use civicreport_core::signup::{validate_new_account, NewAccount};
use civicreport_remote::identity::AuthUser;

use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Successful sign-up response. No session is started: the auth screen
/// flips to sign-in mode and the user authenticates explicitly.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// Mode the auth screen should switch to.
    pub mode: &'static str,
    pub message: &'static str,
}

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub access_token: String,
    /// Where the UI navigates next.
    pub redirect: &'static str,
    pub user: AuthUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new account with the identity service.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Json<SignupResponse>> {
    let account = NewAccount {
        email: input.email,
        password: input.password,
        username: input.username,
        phone: input.phone,
    };

    // 1. Validate locally. A payload that fails here never reaches the backend.
    validate_new_account(&account)?;

    // 2. Register upstream; a rejection (e.g. email already registered)
    //    surfaces with the backend's message.
    state.identity.sign_up(&account).await?;

    tracing::info!(username = %account.username, "Account created");

    // 3. Flip the auth screen to sign-in mode.
    Ok(Json(SignupResponse {
        mode: "sign_in",
        message: "Account created! You can now sign in.",
    }))
}

/// POST /api/v1/auth/signin
///
/// Exchange credentials for an access token and register the session.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninRequest>,
) -> AppResult<Json<SigninResponse>> {
    // 1. Authenticate upstream.
    let session = state
        .identity
        .sign_in(&input.email, &input.password)
        .await?;

    // 2. Register the server-side session under the minted token.
    state
        .sessions
        .create(session.access_token.clone(), session.user.clone());

    tracing::info!(user_id = %session.user.id, "User signed in");

    Ok(Json(SigninResponse {
        access_token: session.access_token,
        redirect: "/dashboard",
        user: session.user,
    }))
}

/// POST /api/v1/auth/signout
///
/// Destroy the caller's session. Returns 204 No Content. The local session
/// dies even when upstream revocation fails; that failure is only logged.
pub async fn signout(State(state): State<AppState>, user: CurrentUser) -> AppResult<StatusCode> {
    // 1. Destroy the local session first so the token is dead here whatever
    //    happens upstream.
    state.sessions.destroy(&user.access_token);

    // 2. Best-effort revocation upstream.
    if let Err(e) = state.identity.sign_out(&user.access_token).await {
        tracing::warn!(error = %e, "Upstream sign-out failed after local session destroy");
    }

    tracing::info!(user_id = %user.user.id, "User signed out");

    Ok(StatusCode::NO_CONTENT)
}
