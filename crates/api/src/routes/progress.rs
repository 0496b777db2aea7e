//! Route definitions for the progress screen.
//!
//! Requires an active session.

use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/progress`.
///
/// ```text
/// GET  /   -> progress_board
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(progress::progress_board))
}
