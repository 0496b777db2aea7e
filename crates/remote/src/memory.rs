//! In-memory backend implementation.
//!
//! Behaves like the hosted backend from the service's point of view:
//! accounts, tokens, issue rows, and photo blobs all live in process
//! memory. Used as the offline development backend and as the collaborator
//! in integration tests, so it also records per-operation call counts and
//! supports one-shot failure injection.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use civicreport_core::issue::{Issue, IssueSummary, NewIssue};
use civicreport_core::signup::NewAccount;
use civicreport_core::types::UserId;

use crate::data::{public_object_url, DataClient, PHOTO_BUCKET};
use crate::error::BackendError;
use crate::identity::{AuthSession, AuthUser, IdentityProvider};

/// Base URL used when deriving public photo URLs.
const MEMORY_BASE_URL: &str = "http://backend.local";

// ---------------------------------------------------------------------------
// Call accounting
// ---------------------------------------------------------------------------

/// One remote operation, for failure injection and call accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    SignUp,
    SignIn,
    SignOut,
    HealthCheck,
    InsertIssue,
    ListIssues,
    ListIssueSummaries,
    UploadPhoto,
}

/// How many times each operation has been invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub sign_up: usize,
    pub sign_in: usize,
    pub sign_out: usize,
    pub health_check: usize,
    pub insert_issue: usize,
    pub list_issues: usize,
    pub list_issue_summaries: usize,
    pub upload_photo: usize,
}

impl CallCounts {
    /// Total calls across every operation.
    pub fn total(&self) -> usize {
        self.sign_up
            + self.sign_in
            + self.sign_out
            + self.health_check
            + self.insert_issue
            + self.list_issues
            + self.list_issue_summaries
            + self.upload_photo
    }
}

// ---------------------------------------------------------------------------
// Stored state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    email: String,
    password: String,
    #[allow(dead_code)]
    username: String,
}

/// A photo blob as received by the storage surface.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPhoto {
    pub path: String,
    pub size_bytes: usize,
    pub content_type: String,
}

pub struct MemoryBackend {
    accounts: Mutex<Vec<Account>>,
    tokens: Mutex<HashMap<String, AuthUser>>,
    issues: Mutex<Vec<Issue>>,
    inserted: Mutex<Vec<NewIssue>>,
    photos: Mutex<Vec<StoredPhoto>>,
    calls: Mutex<CallCounts>,
    failures: Mutex<HashMap<BackendOp, (u16, String)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            tokens: Mutex::new(HashMap::new()),
            issues: Mutex::new(Vec::new()),
            inserted: Mutex::new(Vec::new()),
            photos: Mutex::new(Vec::new()),
            calls: Mutex::new(CallCounts::default()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Arrange for the next invocation of `op` to fail with the given
    /// status and message. The failure is consumed by that invocation.
    pub fn fail_next(&self, op: BackendOp, status: u16, message: &str) {
        lock(&self.failures).insert(op, (status, message.to_string()));
    }

    /// Snapshot of the per-operation call counts.
    pub fn calls(&self) -> CallCounts {
        *lock(&self.calls)
    }

    /// Materialized issue rows, in insertion order.
    pub fn stored_issues(&self) -> Vec<Issue> {
        lock(&self.issues).clone()
    }

    /// Raw insert payloads exactly as received, in arrival order.
    pub fn inserted_payloads(&self) -> Vec<NewIssue> {
        lock(&self.inserted).clone()
    }

    /// Photo blobs received by the storage surface, in arrival order.
    pub fn stored_photos(&self) -> Vec<StoredPhoto> {
        lock(&self.photos).clone()
    }

    /// Insert an issue row directly, bypassing the client surface. Lets
    /// tests control ids, statuses, and timestamps.
    pub fn seed_issue(&self, issue: Issue) {
        lock(&self.issues).push(issue);
    }

    /// Count a call and consume any injected failure for `op`.
    fn begin(&self, op: BackendOp) -> Result<(), BackendError> {
        {
            let mut calls = lock(&self.calls);
            match op {
                BackendOp::SignUp => calls.sign_up += 1,
                BackendOp::SignIn => calls.sign_in += 1,
                BackendOp::SignOut => calls.sign_out += 1,
                BackendOp::HealthCheck => calls.health_check += 1,
                BackendOp::InsertIssue => calls.insert_issue += 1,
                BackendOp::ListIssues => calls.list_issues += 1,
                BackendOp::ListIssueSummaries => calls.list_issue_summaries += 1,
                BackendOp::UploadPhoto => calls.upload_photo += 1,
            }
        }
        if let Some((status, message)) = lock(&self.failures).remove(&op) {
            return Err(BackendError::Api { status, message });
        }
        Ok(())
    }

    /// Resolve an access token or fail the way the backend would.
    fn require_token(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        lock(&self.tokens)
            .get(access_token)
            .cloned()
            .ok_or_else(|| BackendError::api(401, "Invalid JWT"))
    }

    /// Issue rows sorted newest first, ties keeping insertion order.
    fn rows_newest_first(&self) -> Vec<Issue> {
        let mut rows = lock(&self.issues).clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MemoryBackend {
    async fn sign_up(&self, account: &NewAccount) -> Result<(), BackendError> {
        self.begin(BackendOp::SignUp)?;
        let mut accounts = lock(&self.accounts);
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(BackendError::api(422, "User already registered"));
        }
        accounts.push(Account {
            id: Uuid::new_v4().to_string(),
            email: account.email.clone(),
            password: account.password.clone(),
            username: account.username.clone(),
        });
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        self.begin(BackendOp::SignIn)?;
        let user = lock(&self.accounts)
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| AuthUser {
                id: a.id.clone(),
                email: a.email.clone(),
            })
            .ok_or_else(|| BackendError::api(400, "Invalid login credentials"))?;

        let access_token = Uuid::new_v4().to_string();
        lock(&self.tokens).insert(access_token.clone(), user.clone());
        Ok(AuthSession { access_token, user })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        self.begin(BackendOp::SignOut)?;
        match lock(&self.tokens).remove(access_token) {
            Some(_) => Ok(()),
            None => Err(BackendError::api(401, "Invalid JWT")),
        }
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.begin(BackendOp::HealthCheck)
    }
}

#[async_trait]
impl DataClient for MemoryBackend {
    async fn insert_issue(
        &self,
        access_token: &str,
        issue: &NewIssue,
    ) -> Result<(), BackendError> {
        self.begin(BackendOp::InsertIssue)?;
        self.require_token(access_token)?;
        lock(&self.inserted).push(issue.clone());
        lock(&self.issues).push(Issue {
            id: Uuid::new_v4().to_string(),
            issue_type: issue.issue_type.clone(),
            location: issue.location.clone(),
            description: issue.description.clone(),
            photo_url: issue.photo_url.clone(),
            status: "Pending".to_string(),
            created_by: issue.created_by.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_issues(&self, access_token: &str) -> Result<Vec<Issue>, BackendError> {
        self.begin(BackendOp::ListIssues)?;
        self.require_token(access_token)?;
        Ok(self.rows_newest_first())
    }

    async fn list_issue_summaries(
        &self,
        access_token: &str,
    ) -> Result<Vec<IssueSummary>, BackendError> {
        self.begin(BackendOp::ListIssueSummaries)?;
        self.require_token(access_token)?;
        Ok(self
            .rows_newest_first()
            .into_iter()
            .map(|row| IssueSummary {
                id: row.id,
                issue_type: row.issue_type,
                location: row.location,
                status: row.status,
                created_at: row.created_at,
            })
            .collect())
    }

    async fn upload_photo(
        &self,
        access_token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        self.begin(BackendOp::UploadPhoto)?;
        self.require_token(access_token)?;
        lock(&self.photos).push(StoredPhoto {
            path: path.to_string(),
            size_bytes: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    fn photo_public_url(&self, path: &str) -> String {
        public_object_url(MEMORY_BASE_URL, PHOTO_BUCKET, path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
