//! Server-side session registry.
//!
//! The managed backend mints access tokens; this registry decides which of
//! them the service will act on. A token is only honoured if it was handed
//! out by a sign-in on this service and has not been destroyed or expired,
//! so every handler works from an explicit session context instead of any
//! ambient signed-in state. Tokens stay opaque: expiry here is the
//! registry's own TTL, independent of whatever lifetime the backend gave
//! the token.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;

use civicreport_core::types::Timestamp;
use civicreport_remote::identity::AuthUser;

struct SessionEntry {
    user: AuthUser,
    expires_at: Timestamp,
}

/// Registry of live sessions, keyed by access token.
pub struct Sessions {
    ttl_mins: i64,
    entries: RwLock<HashMap<String, SessionEntry>>,
}

impl Sessions {
    pub fn new(ttl_mins: i64) -> Self {
        Self {
            ttl_mins,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session for `access_token`, replacing any previous one
    /// under the same token.
    pub fn create(&self, access_token: String, user: AuthUser) {
        let expires_at = Utc::now() + chrono::Duration::minutes(self.ttl_mins);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(access_token, SessionEntry { user, expires_at });
    }

    /// Look up the user behind a token. An expired entry is removed on the
    /// spot and reported as absent.
    pub fn resolve(&self, access_token: &str) -> Option<AuthUser> {
        let now = Utc::now();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(access_token) {
                Some(entry) if entry.expires_at > now => return Some(entry.user.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.destroy(access_token);
        None
    }

    /// Remove a session. Returns whether one existed.
    pub fn destroy(&self, access_token: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(access_token)
            .is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Number of registered sessions, expired or not.
    pub fn active_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Spawn a background task that periodically sweeps expired sessions.
///
/// The task runs for the lifetime of the server; the returned `JoinHandle`
/// is used to abort it during shutdown.
pub fn start_sweeper(sessions: Arc<Sessions>, interval_secs: u64) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

        loop {
            interval.tick().await;
            let removed = sessions.sweep();
            if removed > 0 {
                tracing::debug!(removed, "Swept expired sessions");
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
