//! REST API client module for the foliosync backend.
//!
//! This module provides the `ApiClient` the collection synchronizers use
//! to talk to the portfolio-governance API, plus the `ApiError` taxonomy
//! every operation reports through.
//!
//! The API uses bearer token authentication obtained through the
//! `auth/token` endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
