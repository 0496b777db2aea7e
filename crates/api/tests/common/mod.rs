#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use civicreport_api::config::ServerConfig;
use civicreport_api::routes;
use civicreport_api::session::Sessions;
use civicreport_api::state::AppState;
use civicreport_api::submission::SubmissionGuard;
use civicreport_remote::data::DataClient;
use civicreport_remote::identity::IdentityProvider;
use civicreport_remote::memory::MemoryBackend;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_mins: 60,
        session_sweep_secs: 300,
    }
}

/// Shared collaborators behind the test router.
///
/// `router()` builds a fresh `Router` per request (oneshot consumes it)
/// while the backend, session registry, and submission guard stay shared,
/// so state persists across requests within a test.
pub struct TestApp {
    pub backend: Arc<MemoryBackend>,
    pub sessions: Arc<Sessions>,
    pub submissions: Arc<SubmissionGuard>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        Self {
            backend: Arc::new(MemoryBackend::new()),
            sessions: Arc::new(Sessions::new(config.session_ttl_mins)),
            submissions: SubmissionGuard::new(),
        }
    }

    /// Build the full application router with all middleware layers.
    ///
    /// This mirrors the router construction in `main.rs` so integration
    /// tests exercise the same middleware stack (CORS, request ID, timeout,
    /// tracing, panic recovery) that production uses.
    pub fn router(&self) -> Router {
        let state = AppState {
            identity: Arc::clone(&self.backend) as Arc<dyn IdentityProvider>,
            data: Arc::clone(&self.backend) as Arc<dyn DataClient>,
            sessions: Arc::clone(&self.sessions),
            submissions: Arc::clone(&self.submissions),
            config: Arc::new(test_config()),
        };

        let cors = CorsLayer::new()
            .allow_origin(["http://localhost:5173".parse().unwrap()])
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true)
            .max_age(Duration::from_secs(3600));

        let request_id_header = HeaderName::from_static("x-request-id");

        Router::new()
            .merge(routes::health::router())
            .nest("/api/v1", routes::api_routes())
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
            .layer(cors)
            .with_state(state)
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Parse the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "test-boundary-7f3a9c";

/// One part of a hand-built multipart body.
pub enum Part {
    Text { name: &'static str, value: String },
    File {
        name: &'static str,
        filename: String,
        content_type: &'static str,
        bytes: Vec<u8>,
    },
}

impl Part {
    pub fn text(name: &'static str, value: &str) -> Self {
        Part::Text {
            name,
            value: value.to_string(),
        }
    }

    pub fn file(name: &'static str, filename: &str, content_type: &'static str, bytes: Vec<u8>) -> Self {
        Part::File {
            name,
            filename: filename.to_string(),
            content_type,
            bytes,
        }
    }
}

/// Encode parts as a `multipart/form-data` body.
fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[Part],
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Sign up and sign in a fresh account, returning `(access_token, user_id)`.
pub async fn open_session(app: &TestApp, email: &str) -> (String, String) {
    let body = serde_json::json!({
        "email": email,
        "password": "secret1",
        "username": "reporter",
    });
    let response = post_json(app.router(), "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "email": email, "password": "secret1" });
    let response = post_json(app.router(), "/api/v1/auth/signin", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    let user_id = json["user"]["id"].as_str().unwrap().to_string();
    (token, user_id)
}
