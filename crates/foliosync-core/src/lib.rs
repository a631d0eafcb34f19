//! foliosync-core: client synchronization layer for the foliosync
//! portfolio-governance application.
//!
//! This crate holds everything a front-end needs between its screens and
//! the remote REST API:
//!
//! - `api`: the authenticated HTTP client and the `ApiError` taxonomy
//! - `models`: typed Records for each resource slice, with draft and
//!   patch payload types
//! - `sync`: the per-collection cache synchronizer and its observable
//!   `CollectionState`
//! - `portfolio`: the aggregate of all synchronizers plus bulk refresh
//! - `auth`: login session tracking backed by the OS keychain
//! - `config`: API endpoint and portfolio selection
//!
//! Screens subscribe to collection state and issue intents; the
//! synchronizers own all mutation of the cached data.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod portfolio;
pub mod sync;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use portfolio::{Portfolio, RefreshReport};
pub use sync::{CollectionState, DerivedResults, RequestState, Resource, Synchronizer};
