use std::path::Path;

use super::{AppConfig, ConfigError, GENERATION_URL_ENV};

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;

    Ok(config)
}

/// Apply environment overrides on top of the loaded configuration
pub fn apply_env_overrides(config: &mut AppConfig) {
    override_backend_url(config, std::env::var(GENERATION_URL_ENV).ok());
}

/// Replace the backend URL when the override is present and non-empty
fn override_backend_url(config: &mut AppConfig, url: Option<String>) {
    if let Some(url) = url {
        if !url.trim().is_empty() {
            config.backend.url = url;
        }
    }
}
