//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use civicreport_core::error::CoreError;
use civicreport_remote::identity::AuthUser;

use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user extracted from a Bearer token in the `Authorization`
/// header, resolved against the server-side session registry.
///
/// Use this as an extractor parameter in any handler that requires a
/// session. The extractor fails with 401 before the handler body runs, so
/// an unauthenticated request never reaches the backend collaborators:
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Identity behind the session.
    pub user: AuthUser,
    /// The access token, passed on to backend calls made for this request.
    pub access_token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let user = state.sessions.resolve(token).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("No active session".into()))
        })?;

        Ok(CurrentUser {
            user,
            access_token: token.to_string(),
        })
    }
}
