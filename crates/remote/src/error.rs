//! Error type shared by every backend client operation.

/// Errors from the managed-backend client layer.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status code.
    #[error("Backend error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message extracted from the response body.
        message: String,
    },
}

impl BackendError {
    /// Build an API rejection.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Status code of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(_) => None,
        }
    }
}

/// Pull a human-readable message out of a backend error body.
///
/// The identity and record services disagree on the field name (`msg`,
/// `message`, `error_description`, or `error` depending on the surface), so
/// each is tried in turn. A body that is not JSON, or carries none of the
/// known fields, is returned as-is.
pub fn error_message_from_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_identity_service_message() {
        assert_eq!(
            error_message_from_body(r#"{"msg":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            error_message_from_body(r#"{"error":"invalid_grant","error_description":"Bad creds"}"#),
            "Bad creds"
        );
    }

    #[test]
    fn extracts_record_service_message() {
        assert_eq!(
            error_message_from_body(r#"{"message":"permission denied for table issues"}"#),
            "permission denied for table issues"
        );
    }

    #[test]
    fn error_description_wins_over_bare_error_field() {
        // "error" is often a machine code, not a sentence; prefer the prose.
        let body = r#"{"error_description":"Email not confirmed","error":"invalid_grant"}"#;
        assert_eq!(error_message_from_body(body), "Email not confirmed");
    }

    #[test]
    fn non_json_body_passes_through() {
        assert_eq!(error_message_from_body("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message_from_body(""), "");
    }

    #[test]
    fn status_accessor_only_reports_api_errors() {
        assert_eq!(BackendError::api(404, "gone").status(), Some(404));
    }
}
