//! Issue records and submission validation.
//!
//! The issue collection lives in the managed backend; these types describe
//! its rows and the payload this service is allowed to insert. Status is
//! intentionally absent from [`NewIssue`]: new reports always enter the
//! backend in its default lifecycle stage.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Issue categories offered by the report form, in display order.
pub const ISSUE_TYPES: &[&str] = &[
    "Road Damage",
    "Garbage Problem",
    "Water Leakage",
    "Street Light Failure",
];

/// Maximum length for the user-provided description field (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;

/// Length at which list views cut the description off (characters).
pub const DESCRIPTION_PREVIEW_CHARS: usize = 140;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A full issue row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: RecordId,
    pub issue_type: String,
    pub location: String,
    pub description: String,
    pub photo_url: Option<String>,
    pub status: String,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

/// Narrow projection used by the progress board; fetching full rows there
/// would drag descriptions and photo URLs across the wire for no reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: RecordId,
    pub issue_type: String,
    pub location: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// Insert payload for a new report. Serializes directly onto the wire:
/// `photo_url` stays present as an explicit `null` when no photo was
/// attached, and there is no `status` field for a client to set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    pub issue_type: String,
    pub location: String,
    pub description: String,
    pub photo_url: Option<String>,
    pub created_by: UserId,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that an issue type is one of the offered categories.
pub fn validate_issue_type(issue_type: &str) -> Result<(), CoreError> {
    if issue_type.is_empty() {
        return Err(CoreError::Validation(
            "Issue type must not be empty".to_string(),
        ));
    }
    if ISSUE_TYPES.contains(&issue_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid issue type '{}'. Must be one of: {:?}",
            issue_type, ISSUE_TYPES
        )))
    }
}

/// Validate the location field.
pub fn validate_location(location: &str) -> Result<(), CoreError> {
    if location.is_empty() {
        return Err(CoreError::Validation(
            "Location must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate the description field.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.is_empty() {
        return Err(CoreError::Validation(
            "Description must not be empty".to_string(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {} characters (got {})",
            MAX_DESCRIPTION_LENGTH,
            description.chars().count()
        )));
    }
    Ok(())
}

/// Cut a description down to [`DESCRIPTION_PREVIEW_CHARS`] characters for
/// list views, appending an ellipsis when anything was dropped. Counts
/// characters, not bytes, so multi-byte text never splits mid-character.
pub fn truncate_preview(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        None => description.to_string(),
        Some((cut, _)) => {
            let mut preview = description[..cut].to_string();
            preview.push('…');
            preview
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
