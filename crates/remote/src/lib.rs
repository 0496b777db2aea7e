//! Client SDK for the managed backend.
//!
//! The CivicReport service owns no database and no object store: accounts,
//! issue rows, and photo blobs all live in an external managed backend
//! reached over HTTP. This crate defines the two collaborator surfaces the
//! service depends on -- [`identity::IdentityProvider`] for accounts and
//! sessions, [`data::DataClient`] for rows and blobs -- together with the
//! production HTTP implementation and an in-memory one for development and
//! tests.

pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod identity;
pub mod memory;
