//! Handlers for the `/reports` resource: submission and the list view.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use civicreport_core::error::CoreError;
use civicreport_core::issue::{
    truncate_preview, validate_description, validate_issue_type, validate_location, NewIssue,
};
use civicreport_core::photo::{content_type_for, storage_path, validate_photo};
use civicreport_core::status::{badge_for_status, BadgeVariant};
use civicreport_core::types::RecordId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Fields collected from the submission form's multipart body.
struct SubmissionForm {
    issue_type: String,
    location: String,
    description: String,
    /// Filename and bytes of the attached photo, when one was sent.
    photo: Option<(String, Vec<u8>)>,
}

/// Response for a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitReceipt {
    pub message: &'static str,
    /// Where the UI navigates next.
    pub redirect: &'static str,
}

/// One card in the reports list view.
#[derive(Debug, Serialize)]
pub struct ReportCard {
    pub id: RecordId,
    pub issue_type: String,
    pub status: String,
    pub badge: BadgeVariant,
    pub location: String,
    /// Description cut to preview length.
    pub description: String,
    pub photo_url: Option<String>,
    /// Submission date, `YYYY-MM-DD`.
    pub reported_on: String,
}

/// View model for the reports list screen.
#[derive(Debug, Serialize)]
pub struct ReportsView {
    pub reports: Vec<ReportCard>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/reports
///
/// Submit a new issue report (multipart: `issue_type`, `location`,
/// `description`, optional `photo`). The photo is uploaded first; if that
/// upload fails the report is not inserted. One submission per user may be
/// in flight at a time.
pub async fn submit_report(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitReceipt>>)> {
    let form = read_submission_form(multipart).await?;

    // 1. Validate everything locally before any backend call.
    validate_issue_type(&form.issue_type)?;
    validate_location(&form.location)?;
    validate_description(&form.description)?;
    let photo = match form.photo {
        Some((filename, bytes)) => {
            let ext = validate_photo(&filename, bytes.len())?;
            Some((ext, bytes))
        }
        None => None,
    };

    // 2. Claim the per-user submission slot for the rest of the handler.
    let _permit = state.submissions.acquire(&user.user.id).ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "A report submission is already in progress for this account".into(),
        ))
    })?;

    // 3. Upload the photo, if any, and derive its public URL.
    let photo_url = match photo {
        Some((ext, bytes)) => {
            let path = storage_path(&user.user.id, Utc::now().timestamp_millis(), &ext);
            state
                .data
                .upload_photo(&user.access_token, &path, bytes, content_type_for(&ext))
                .await?;
            Some(state.data.photo_public_url(&path))
        }
        None => None,
    };

    // 4. Insert the issue row. The backend assigns id, status, and timestamp.
    let issue = NewIssue {
        issue_type: form.issue_type,
        location: form.location,
        description: form.description,
        photo_url,
        created_by: user.user.id.clone(),
    };
    state.data.insert_issue(&user.access_token, &issue).await?;

    tracing::info!(
        user_id = %user.user.id,
        issue_type = %issue.issue_type,
        has_photo = issue.photo_url.is_some(),
        "Issue report submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitReceipt {
                message: "Your civic issue has been submitted successfully.",
                redirect: "/reports",
            },
        }),
    ))
}

/// GET /api/v1/reports
///
/// All submitted reports as list cards, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<DataResponse<ReportsView>>> {
    let issues = state.data.list_issues(&user.access_token).await?;

    // The backend orders the rows; nothing here re-sorts.
    let reports = issues
        .into_iter()
        .map(|issue| ReportCard {
            id: issue.id,
            badge: badge_for_status(&issue.status),
            status: issue.status,
            issue_type: issue.issue_type,
            location: issue.location,
            description: truncate_preview(&issue.description),
            photo_url: issue.photo_url,
            reported_on: issue.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: ReportsView { reports },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Drain the multipart body into a [`SubmissionForm`]. Text fields default
/// to empty (validation rejects them with a field-specific message); a
/// `photo` part without a filename counts as no photo.
async fn read_submission_form(mut multipart: Multipart) -> AppResult<SubmissionForm> {
    let mut form = SubmissionForm {
        issue_type: String::new(),
        location: String::new(),
        description: String::new(),
        photo: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "issue_type" => {
                form.issue_type = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "location" => {
                form.location = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "description" => {
                form.description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "photo" => {
                let filename = field.file_name().unwrap_or("").to_string();
                if filename.is_empty() {
                    continue;
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.photo = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}
