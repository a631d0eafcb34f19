use anyhow::{Context, Result};
use keyring::Entry;

use super::SessionData;

const SERVICE_NAME: &str = "foliosync";

/// OS keychain wrapper holding the serialized session per username.
pub struct CredentialStore;

impl CredentialStore {
    /// Store a session in the OS keychain
    pub fn store_session(data: &SessionData) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, &data.username)
            .context("Failed to create keyring entry")?;
        let payload = serde_json::to_string(data)?;
        entry
            .set_password(&payload)
            .context("Failed to store session in keychain")?;
        Ok(())
    }

    /// Retrieve the stored session for a username, if any
    pub fn load_session(username: &str) -> Result<Option<SessionData>> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        match entry.get_password() {
            Ok(payload) => {
                let data = serde_json::from_str(&payload)
                    .context("Failed to parse stored session")?;
                Ok(Some(data))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read session from keychain"),
        }
    }

    /// Delete the stored session for a username
    pub fn delete(username: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, username)
            .context("Failed to create keyring entry")?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete session from keychain"),
        }
    }

    /// Check if a session exists for a username
    pub fn has_session(username: &str) -> bool {
        if let Ok(entry) = Entry::new(SERVICE_NAME, username) {
            entry.get_password().is_ok()
        } else {
            false
        }
    }
}
