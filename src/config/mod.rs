mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::{apply_env_overrides, load_config};

/// Environment variable overriding `backend.url`
pub const GENERATION_URL_ENV: &str = "GENERATION_URL";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Relay server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Text-generation backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Full endpoint URL (e.g., "https://example.ngrok-free.app/generate")
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Outbound payload shape
    #[serde(default)]
    pub flavor: BackendFlavor,
    /// Accept invalid certificates (self-signed, expired)
    #[serde(default)]
    pub accept_invalid_certs: bool,
    /// Bearer token for backend authentication
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_backend_url() -> String {
    "http://localhost:8000/generate".to_string()
}

fn default_timeout() -> u64 {
    300
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_seconds: default_timeout(),
            flavor: BackendFlavor::default(),
            accept_invalid_certs: false,
            api_key: None,
        }
    }
}

impl BackendConfig {
    /// Returns the endpoint URL with trailing slash stripped
    pub fn endpoint(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Outbound payload shape
///
/// `generate` posts `{prompt, ...sampling}` and reads `{generated_text}`.
/// `messages` posts the whole conversation and reads
/// `output.message.content[0].text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendFlavor {
    #[default]
    Generate,
    Messages,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load from the given path, or discover a default file, or fall back
    /// to the built-in defaults so the relay can run from environment
    /// variables alone
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                let default_paths = ["config.yaml", "config.yml", "./config/config.yaml"];
                for p in default_paths {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                Ok(Self::default())
            }
        }
    }

    /// Check that the backend endpoint is a usable HTTP URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.backend.url).map_err(|e| {
            ConfigError::Validation(format!("backend url {:?}: {}", self.backend.url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "backend url must be http or https, got {:?}",
                parsed.scheme()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
