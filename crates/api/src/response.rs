//! Shared response envelope types for API handlers.
//!
//! Screen-view endpoints use a `{ "data": ... }` envelope per project
//! conventions (auth endpoints return bare payloads). Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
