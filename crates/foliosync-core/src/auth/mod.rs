//! Session and credential management.
//!
//! The bearer token obtained at login is the only state this library
//! persists; it is held in the OS keychain through `CredentialStore`
//! and tracked in memory by `Session`.

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Session, SessionData};
