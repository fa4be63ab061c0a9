//! Configuration management for the Equiviz CLI
//!
//! Handles the API base URL and the directory holding the persisted session.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default API base URL; every endpoint lives under `/api`.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the API base URL
pub const SERVER_URL_ENV: &str = "EQUIVIZ_SERVER_URL";

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "EQUIVIZ_STATE_DIR";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API base URL, without trailing slash
    pub server_url: String,

    /// Directory holding `credentials.toml`
    pub state_dir: PathBuf,

    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Create a config with default values
    pub fn new() -> Result<Self> {
        let state_dir = dirs::config_dir()
            .ok_or_else(|| CliError::config("Could not determine config directory"))?
            .join("equiviz");

        Ok(Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            state_dir,
            verbose: false,
        })
    }

    /// Defaults overridden by `EQUIVIZ_SERVER_URL` and `EQUIVIZ_STATE_DIR`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new().unwrap_or_default();

        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            config.set_server_url(url);
        }

        if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
            config.state_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, server_url: Option<String>, state_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(url) = server_url {
            self.set_server_url(url);
        }
        if let Some(dir) = state_dir {
            self.state_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn state_dir(&self) -> &PathBuf {
        &self.state_dir
    }

    /// Set the API base URL, dropping any trailing slash
    pub fn set_server_url(&mut self, url: String) {
        self.server_url = url.trim_end_matches('/').to_string();
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn validate(&self) -> Result<()> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(CliError::config(format!(
                "Server URL must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        // Fall back to a local directory when there is no platform config dir
        Self::new().unwrap_or_else(|_| Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            state_dir: PathBuf::from(".equiviz"),
            verbose: false,
        })
    }
}
