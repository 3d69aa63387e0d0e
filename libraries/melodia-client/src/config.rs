//! Client configuration.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix (`MELODIA_API_BASE_URL`, ...)
pub const ENV_PREFIX: &str = "MELODIA";

/// Configuration for connecting to the Melodia backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g. "http://localhost:8080")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Where the bearer token is persisted between runs
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            token_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `url` with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            api_base_url: url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from an optional TOML file, then the environment.
    ///
    /// Environment variables use the `MELODIA_` prefix and win over the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Token file location: the configured path or `<data dir>/melodia/session.json`.
    pub fn resolved_token_path(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("melodia")
                .join("session.json")
        })
    }
}
