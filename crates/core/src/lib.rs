//! Domain types, validation, and pure computation for CivicReport.
//!
//! This crate contains no I/O: everything here operates on data the caller
//! passes in. The `remote` crate talks to the managed backend and the `api`
//! crate exposes the HTTP surface; both build on the types defined here.

pub mod error;
pub mod issue;
pub mod photo;
pub mod progress;
pub mod signup;
pub mod status;
pub mod types;
