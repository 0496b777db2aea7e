use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use civicreport_core::error::CoreError;
use civicreport_remote::error::BackendError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`BackendError`] for failures
/// talking to the managed backend. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `civicreport_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the managed-backend client.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Backend errors ---
            AppError::Backend(err) => classify_backend_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a backend client error into an HTTP status, error code, and message.
///
/// - A 4xx from the backend passes through with its status and message
///   verbatim: the backend rejected this specific request (bad credentials,
///   a policy violation, an expired token) and the caller needs to see why.
/// - A 5xx from the backend, and any transport failure, maps to 502: the
///   backend is unavailable and the caller's request was never the problem.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Api { status, message } if (400..500).contains(status) => {
            let status =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, "UPSTREAM_REJECTED", message.clone())
        }
        BackendError::Api { status, message } => {
            tracing::error!(status, error = %message, "Backend error");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNAVAILABLE",
                message.clone(),
            )
        }
        BackendError::Request(e) => {
            tracing::error!(error = %e, "Backend request failed");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNAVAILABLE",
                format!("Backend request failed: {e}"),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_4xx_passes_through() {
        let err = BackendError::api(400, "Invalid login credentials");
        let (status, code, message) = classify_backend_error(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "UPSTREAM_REJECTED");
        assert_eq!(message, "Invalid login credentials");
    }

    #[test]
    fn upstream_401_keeps_its_status() {
        let err = BackendError::api(401, "JWT expired");
        let (status, _, _) = classify_backend_error(&err);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_5xx_maps_to_bad_gateway() {
        let err = BackendError::api(503, "Service Unavailable");
        let (status, code, _) = classify_backend_error(&err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "BACKEND_UNAVAILABLE");
    }
}
