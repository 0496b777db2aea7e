//! Issue status vocabulary and badge styling.
//!
//! Statuses are written by municipal staff through backend tooling, not by
//! this service, so parsing is lenient: a status string outside the known
//! vocabulary is reported as unrecognized rather than rejected.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Issue status
// ---------------------------------------------------------------------------

/// Lifecycle stage of a reported issue, as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

/// All recognized statuses, in board column order.
pub const STATUS_ORDER: [IssueStatus; 3] = [
    IssueStatus::Pending,
    IssueStatus::InProgress,
    IssueStatus::Completed,
];

impl IssueStatus {
    /// Parse a stored status string. Matching is exact: the backend stores
    /// these as display strings, and anything else is unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// The stored (and displayed) form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Badge styling variant for this status.
    pub fn badge(&self) -> BadgeVariant {
        match self {
            Self::Pending => BadgeVariant::Warning,
            Self::InProgress => BadgeVariant::Info,
            Self::Completed => BadgeVariant::Success,
        }
    }
}

// ---------------------------------------------------------------------------
// Badge variant
// ---------------------------------------------------------------------------

/// Visual variant the UI applies to a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Warning,
    Info,
    Success,
    Neutral,
}

/// Badge variant for a raw status string; unrecognized statuses get the
/// neutral variant.
pub fn badge_for_status(status: &str) -> BadgeVariant {
    match IssueStatus::parse(status) {
        Some(s) => s.badge(),
        None => BadgeVariant::Neutral,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
