use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::CredentialStore;

/// Token expiry time in minutes.
/// The backend issues tokens valid for one hour.
const TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Buffer time before expiry to trigger re-login (5 minutes)
const TOKEN_REFRESH_BUFFER_MINUTES: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub obtained_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, username: &str) -> Self {
        Self {
            token,
            username: username.to_string(),
            obtained_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        let expiry = self.obtained_at + Duration::minutes(TOKEN_EXPIRY_MINUTES);
        Utc::now() > expiry
    }

    /// Check if the session will expire soon and should be renewed
    pub fn needs_refresh(&self) -> bool {
        let refresh_at = self.obtained_at
            + Duration::minutes(TOKEN_EXPIRY_MINUTES - TOKEN_REFRESH_BUFFER_MINUTES);
        Utc::now() > refresh_at
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        let expiry = self.obtained_at + Duration::minutes(TOKEN_EXPIRY_MINUTES);
        (expiry - Utc::now()).num_minutes().max(0)
    }
}

/// In-memory session handle, persisted through the OS keychain.
///
/// The bearer token is the only thing this library ever stores outside
/// process memory; it lives in the credential store, never on disk.
#[derive(Default)]
pub struct Session {
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new() -> Self {
        Self { data: None }
    }

    /// Load a previously stored session for the given username.
    /// Returns true when a valid (non-expired) session was found.
    pub fn load(&mut self, username: &str) -> Result<bool> {
        if let Some(data) = CredentialStore::load_session(username)? {
            if !data.is_expired() {
                self.data = Some(data);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Persist the current session to the credential store
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            CredentialStore::store_session(data)?;
        }
        Ok(())
    }

    /// Drop the session and remove it from the credential store
    pub fn clear(&mut self) -> Result<()> {
        if let Some(data) = self.data.take() {
            CredentialStore::delete(&data.username)?;
        }
        Ok(())
    }

    /// Replace the session after a fresh login
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Get the bearer token if a session is held
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    /// Check if the session is valid (exists and not expired)
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }
}
