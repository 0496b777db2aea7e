pub mod auth;
pub mod dashboard;
pub mod health;
pub mod progress;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup       create an account (public)
/// /auth/signin       open a session (public)
/// /auth/signout      close the session (requires session)
///
/// /dashboard         landing screen view model (requires session)
///
/// /reports           list reports (GET), submit a report (POST, multipart)
///
/// /progress          reports grouped by resolution status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account and session routes (signup, signin, signout).
        .nest("/auth", auth::router())
        // Landing screen after sign-in.
        .nest("/dashboard", dashboard::router())
        // Issue report submission and listing.
        .nest("/reports", reports::router())
        // Status board for submitted reports.
        .nest("/progress", progress::router())
}
