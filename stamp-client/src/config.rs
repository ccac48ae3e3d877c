//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{ClientError, Result};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "STAMP_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Stamping service connection
    #[serde(default)]
    pub server: ServerConfig,

    /// Proof retrieval behaviour
    #[serde(default)]
    pub poll: PollConfig,

    /// Local record store
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the stamping service
    pub url: String,

    /// Timeout for each individual HTTP request (seconds)
    pub request_timeout_secs: u64,

    /// API key (provided via environment variable rather than written out)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Wait for a pending proof instead of failing straight away
    pub wait: bool,

    /// Overall wait budget (seconds); one fetch per second
    pub timeout_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding fetched stamp records
    pub dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            api_key: None,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            wait: true,
            timeout_secs: 30.0,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".stamp"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config: ClientConfig = toml::from_str(&contents).map_err(|e| {
            ClientError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        config.apply_env();
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env();
            Ok(config)
        }
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ClientError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents).map_err(|e| {
            ClientError::Config(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    // Load API key from environment variable if not set
    fn apply_env(&mut self) {
        if self.server.api_key.is_none() {
            self.server.api_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
        }
    }
}
