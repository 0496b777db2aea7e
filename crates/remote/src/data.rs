//! Record and blob surface: the issue collection and the photo bucket.

use async_trait::async_trait;

use civicreport_core::issue::{Issue, IssueSummary, NewIssue};

use crate::error::BackendError;

/// Record collection that holds issue reports.
pub const ISSUES_COLLECTION: &str = "issues";

/// Storage bucket that holds report photos. The bucket is public-read;
/// writes require an authenticated token.
pub const PHOTO_BUCKET: &str = "issue-photos";

/// Row and blob operations against the backend's data plane. Every call
/// acts under the given `access_token`; there is no ambient session.
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Insert one new issue row. The backend assigns the id, the initial
    /// status, and the creation timestamp.
    async fn insert_issue(&self, access_token: &str, issue: &NewIssue)
        -> Result<(), BackendError>;

    /// All issue rows, newest first.
    async fn list_issues(&self, access_token: &str) -> Result<Vec<Issue>, BackendError>;

    /// Narrow projection of all issue rows, newest first. Used by the
    /// progress board, which needs neither descriptions nor photo URLs.
    async fn list_issue_summaries(
        &self,
        access_token: &str,
    ) -> Result<Vec<IssueSummary>, BackendError>;

    /// Store a photo blob under `path` in the photo bucket.
    async fn upload_photo(
        &self,
        access_token: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError>;

    /// Public URL that serves a stored photo. Pure computation: no request
    /// is made and the path is not checked for existence.
    fn photo_public_url(&self, path: &str) -> String;
}

/// Public URL for an object in a public bucket.
pub fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        base_url.trim_end_matches('/'),
        bucket,
        path
    )
}
