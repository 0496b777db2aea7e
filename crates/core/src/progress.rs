//! Progress board grouping.
//!
//! Partitions a fetched issue list into the three board columns. Each
//! record lands in at most one column; records whose status falls outside
//! the known vocabulary are counted but never shown in a column, so the
//! board always displays a subset of what was fetched.

use serde::Serialize;

use crate::issue::IssueSummary;
use crate::status::IssueStatus;

/// Issues bucketed by recognized status, in fetch order within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressBoard {
    pub pending: Vec<IssueSummary>,
    pub in_progress: Vec<IssueSummary>,
    pub completed: Vec<IssueSummary>,
    /// Records dropped from the board because their status is unknown.
    pub unrecognized: usize,
}

impl ProgressBoard {
    /// Partition `summaries` into board columns, preserving input order.
    pub fn partition(summaries: Vec<IssueSummary>) -> Self {
        let mut board = Self::default();
        for summary in summaries {
            match IssueStatus::parse(&summary.status) {
                Some(IssueStatus::Pending) => board.pending.push(summary),
                Some(IssueStatus::InProgress) => board.in_progress.push(summary),
                Some(IssueStatus::Completed) => board.completed.push(summary),
                None => board.unrecognized += 1,
            }
        }
        board
    }

    /// Column contents for a recognized status.
    pub fn bucket(&self, status: IssueStatus) -> &[IssueSummary] {
        match status {
            IssueStatus::Pending => &self.pending,
            IssueStatus::InProgress => &self.in_progress,
            IssueStatus::Completed => &self.completed,
        }
    }

    /// Number of records shown across all three columns.
    pub fn bucketed_total(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.completed.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
