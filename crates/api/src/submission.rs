//! Per-user in-flight submission guard.
//!
//! A user may have at most one report submission in flight at a time: the
//! upload-then-insert sequence must finish (or fail) before that user can
//! start another. The guard hands out RAII permits so the slot is released
//! on every exit path, including early returns and panics.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use civicreport_core::types::UserId;

/// Tracks which users currently have a submission in flight.
#[derive(Default)]
pub struct SubmissionGuard {
    in_flight: Mutex<HashSet<UserId>>,
}

impl SubmissionGuard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claim the submission slot for `user_id`. Returns `None` when that
    /// user already has a submission in flight.
    pub fn acquire(self: &Arc<Self>, user_id: &str) -> Option<SubmissionPermit> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(user_id.to_string()) {
            return None;
        }
        Some(SubmissionPermit {
            guard: Arc::clone(self),
            user_id: user_id.to_string(),
        })
    }

    /// Whether `user_id` currently holds the slot.
    pub fn is_in_flight(&self, user_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id)
    }
}

/// Held for the duration of one submission; releases the slot on drop.
pub struct SubmissionPermit {
    guard: Arc<SubmissionGuard>,
    user_id: UserId,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.guard
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_for_same_user_is_refused() {
        let guard = SubmissionGuard::new();
        let permit = guard.acquire("u1").expect("first acquire should succeed");
        assert!(guard.acquire("u1").is_none());
        drop(permit);
    }

    #[test]
    fn different_users_do_not_contend() {
        let guard = SubmissionGuard::new();
        let _a = guard.acquire("u1").unwrap();
        let _b = guard.acquire("u2").unwrap();
        assert!(guard.is_in_flight("u1"));
        assert!(guard.is_in_flight("u2"));
    }

    #[test]
    fn dropping_the_permit_frees_the_slot() {
        let guard = SubmissionGuard::new();
        let permit = guard.acquire("u1").unwrap();
        drop(permit);
        assert!(!guard.is_in_flight("u1"));
        assert!(guard.acquire("u1").is_some());
    }
}
