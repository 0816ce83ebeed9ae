//! `ServerConfig` and its YAML representation

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base address of the ENISA EUVD REST API
pub const DEFAULT_BASE_URL: &str = "https://euvdservices.enisa.europa.eu/api";

/// Server name announced to the MCP host
pub const DEFAULT_SERVER_NAME: &str = "euvd-enisa-mcp";

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for the client and the protocol server
///
/// All fields are fixed at startup and shared read-only afterwards.
///
/// ```yaml
/// base_url: http://127.0.0.1:8080/api
/// request_timeout_secs: 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the EUVD API, without a trailing slash
    pub base_url: String,
    /// Server name announced in the MCP handshake
    pub server_name: String,
    /// Server version announced in the MCP handshake (opaque)
    pub server_version: String,
    /// Transport-level timeout for a single outbound request
    pub request_timeout_secs: u64,
    /// User-Agent header sent to the EUVD API
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            request_timeout_secs: 30,
            user_agent: format!("{}/{}", DEFAULT_SERVER_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServerConfig {
    /// Parse and validate a YAML document; missing keys take their defaults
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: ServerConfig = serde_yaml::from_str(content)?;
        config.validate()
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the announced server version
    pub fn with_server_version(mut self, version: impl Into<String>) -> Self {
        self.server_version = version.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check invariants and normalize the base URL
    pub fn validate(mut self) -> ConfigResult<Self> {
        let trimmed = self.base_url.trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        self.base_url = trimmed.to_string();

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.server_name.trim().is_empty() {
            return Err(ConfigError::Invalid("server_name must not be empty".to_string()));
        }

        Ok(self)
    }
}
