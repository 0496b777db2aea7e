//! Route definitions for the `/reports` resource.
//!
//! All endpoints require an active session.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use civicreport_core::photo::MAX_PHOTO_BYTES;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET  /   -> list_reports
/// POST /   -> submit_report (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list_reports).post(reports::submit_report))
        // Photo cap plus headroom for the text fields and multipart framing.
        .layer(DefaultBodyLimit::max(MAX_PHOTO_BYTES + 64 * 1024))
}
