//! Route definitions for the dashboard landing screen.
//!
//! Requires an active session.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET  /   -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard::dashboard))
}
