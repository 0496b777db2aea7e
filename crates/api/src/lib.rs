//! HTTP service for the CivicReport front-end.
//!
//! Each screen of the UI maps to a resource under `/api/v1`: auth
//! (sign-up / sign-in / sign-out), the dashboard hub, report submission
//! and listing, and the progress board. Handlers validate locally, then
//! delegate to the managed backend through the `civicreport-remote`
//! collaborator traits held in [`state::AppState`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
pub mod submission;
