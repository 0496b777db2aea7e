use std::sync::Arc;

use civicreport_remote::data::DataClient;
use civicreport_remote::identity::IdentityProvider;

use crate::config::ServerConfig;
use crate::session::Sessions;
use crate::submission::SubmissionGuard;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Identity surface of the managed backend (accounts, tokens).
    pub identity: Arc<dyn IdentityProvider>,
    /// Data surface of the managed backend (issue rows, photo blobs).
    pub data: Arc<dyn DataClient>,
    /// Server-side session registry.
    pub sessions: Arc<Sessions>,
    /// Per-user in-flight submission guard.
    pub submissions: Arc<SubmissionGuard>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
