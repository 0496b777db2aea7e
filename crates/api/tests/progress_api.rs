//! HTTP-level integration tests for the progress screen.

mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::{body_json, get, get_auth, open_session, TestApp};

use civicreport_core::issue::Issue;
use civicreport_remote::memory::BackendOp;

fn seed(app: &TestApp, id: &str, status: &str, day: u32) {
    app.backend.seed_issue(Issue {
        id: id.to_string(),
        issue_type: "Street Light Failure".to_string(),
        location: "Dock Road".to_string(),
        description: "Lamp out for a week".to_string(),
        photo_url: None,
        status: status.to_string(),
        created_by: "seeder".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, day, 8, 30, 0).unwrap(),
    });
}

/// The board always has the three fixed columns, bucketing rows by exact
/// status match and counting anything else as unrecognized.
#[tokio::test]
async fn test_progress_board_buckets_by_status() {
    let app = TestApp::new();
    let (token, _user_id) = open_session(&app, "resident@example.com").await;

    seed(&app, "p-old", "Pending", 1);
    seed(&app, "c-1", "Completed", 2);
    seed(&app, "i-1", "In Progress", 3);
    seed(&app, "p-new", "Pending", 9);
    seed(&app, "weird", "Archived", 4);

    let response = get_auth(app.router(), "/api/v1/progress", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let columns = json["data"]["columns"].as_array().expect("columns array");
    assert_eq!(columns.len(), 3);

    // Fixed column order, independent of row order.
    assert_eq!(columns[0]["status"], "Pending");
    assert_eq!(columns[1]["status"], "In Progress");
    assert_eq!(columns[2]["status"], "Completed");

    assert_eq!(columns[0]["badge"], "warning");
    assert_eq!(columns[1]["badge"], "info");
    assert_eq!(columns[2]["badge"], "success");

    assert_eq!(columns[0]["count"], 2);
    assert_eq!(columns[1]["count"], 1);
    assert_eq!(columns[2]["count"], 1);

    // Within a column, rows keep the fetch order (newest first).
    let pending = columns[0]["items"].as_array().unwrap();
    assert_eq!(pending[0]["id"], "p-new");
    assert_eq!(pending[1]["id"], "p-old");
    assert_eq!(pending[0]["issue_type"], "Street Light Failure");
    assert_eq!(pending[0]["location"], "Dock Road");
    assert_eq!(pending[0]["reported_on"], "2024-03-09");

    // The unknown status is surfaced as a count, not silently dropped.
    assert_eq!(json["data"]["unrecognized"], 1);
}

/// An empty board still renders all three columns.
#[tokio::test]
async fn test_progress_board_empty() {
    let app = TestApp::new();
    let (token, _user_id) = open_session(&app, "resident@example.com").await;

    let response = get_auth(app.router(), "/api/v1/progress", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let columns = json["data"]["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 3);
    for column in columns {
        assert_eq!(column["count"], 0);
        assert_eq!(column["items"].as_array().unwrap().len(), 0);
    }
    assert_eq!(json["data"]["unrecognized"], 0);
}

/// The progress fetch uses the narrow summary query, not the full rows.
#[tokio::test]
async fn test_progress_uses_summary_fetch() {
    let app = TestApp::new();
    let (token, _user_id) = open_session(&app, "resident@example.com").await;

    let response = get_auth(app.router(), "/api/v1/progress", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(app.backend.calls().list_issue_summaries, 1);
    assert_eq!(app.backend.calls().list_issues, 0);
}

/// A failed fetch surfaces instead of rendering an empty board.
#[tokio::test]
async fn test_progress_fetch_failure_is_surfaced() {
    let app = TestApp::new();
    let (token, _user_id) = open_session(&app, "resident@example.com").await;

    app.backend
        .fail_next(BackendOp::ListIssueSummaries, 500, "Internal Server Error");

    let response = get_auth(app.router(), "/api/v1/progress", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BACKEND_UNAVAILABLE");
}

/// The board requires an active session.
#[tokio::test]
async fn test_progress_requires_session() {
    let app = TestApp::new();
    let response = get(app.router(), "/api/v1/progress").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.backend.calls().total(), 0);
}
