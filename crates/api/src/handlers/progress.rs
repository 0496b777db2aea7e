//! Handler for the progress screen: reports grouped by resolution status.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use civicreport_core::issue::IssueSummary;
use civicreport_core::progress::ProgressBoard;
use civicreport_core::status::{BadgeVariant, STATUS_ORDER};
use civicreport_core::types::RecordId;

use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One report inside a status column.
#[derive(Debug, Serialize)]
pub struct ProgressItem {
    pub id: RecordId,
    pub issue_type: String,
    pub location: String,
    /// Submission date, `YYYY-MM-DD`.
    pub reported_on: String,
}

/// One of the three fixed status columns.
#[derive(Debug, Serialize)]
pub struct ProgressColumn {
    pub status: &'static str,
    pub badge: BadgeVariant,
    pub count: usize,
    pub items: Vec<ProgressItem>,
}

/// View model for the progress screen. The columns are always the three
/// known statuses, in board order, even when empty. Reports whose status
/// matches none of them are counted in `unrecognized` rather than dropped.
#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub columns: Vec<ProgressColumn>,
    pub unrecognized: usize,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /api/v1/progress
pub async fn progress_board(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DataResponse<ProgressView>>> {
    let summaries = state.data.list_issue_summaries(&user.access_token).await?;
    let board = ProgressBoard::partition(summaries);

    let columns = STATUS_ORDER
        .iter()
        .map(|status| {
            let items: Vec<ProgressItem> =
                board.bucket(*status).iter().map(progress_item).collect();
            ProgressColumn {
                status: status.as_str(),
                badge: status.badge(),
                count: items.len(),
                items,
            }
        })
        .collect();

    Ok(Json(DataResponse {
        data: ProgressView {
            columns,
            unrecognized: board.unrecognized,
        },
    }))
}

fn progress_item(summary: &IssueSummary) -> ProgressItem {
    ProgressItem {
        id: summary.id.clone(),
        issue_type: summary.issue_type.clone(),
        location: summary.location.clone(),
        reported_on: summary.created_at.format("%Y-%m-%d").to_string(),
    }
}
