//! Application configuration management.
//!
//! This module handles loading and saving the client configuration,
//! which includes the API base URL, the active portfolio slug, and the
//! last used username.
//!
//! Configuration is stored at `~/.config/foliosync/config.json`; the
//! base URL can be overridden with the `FOLIOSYNC_API_URL` environment
//! variable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Application name used for the config directory path
const APP_NAME: &str = "foliosync";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the API base URL
const BASE_URL_ENV: &str = "FOLIOSYNC_API_URL";

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://api.foliosync.app/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: Url,
    pub portfolio: Option<String>,
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            portfolio: None,
            last_username: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(raw) = std::env::var(BASE_URL_ENV) {
            config.api_base_url = Url::parse(&raw)
                .with_context(|| format!("Invalid {} value: {}", BASE_URL_ENV, raw))?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
