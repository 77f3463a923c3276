//! Configuration from environment variables and optional TOML files.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::services::reconcile::Tolerances;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to read config file '{path}': {message}")]
    Io { path: String, message: String },
    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },
}

/// Connection settings for the upstream vessel data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API. Required; there is no built-in
    /// default endpoint.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl UpstreamConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    /// - `VESSEL_API_BASE` (required): base URL of the upstream API
    /// - `VESSEL_API_TIMEOUT_SECS` (optional, default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("VESSEL_API_BASE").map_err(|_| ConfigError::MissingEnv("VESSEL_API_BASE"))?;
        let timeout_secs = match env::var("VESSEL_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "VESSEL_API_TIMEOUT_SECS".to_string(),
                message: format!("'{raw}' is not a valid number of seconds"),
            })?,
            Err(_) => default_timeout_secs(),
        };

        Ok(UpstreamConfig {
            base_url,
            timeout_secs,
        })
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub tolerances: Tolerances,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn test_full_config_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "https://vessels.example.com"
            timeout_secs = 30

            [tolerances]
            eps_abs = 2.5
            eps_pct = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "https://vessels.example.com");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.tolerances.eps_abs, 2.5);
    }

    #[test]
    fn test_defaults_apply() {
        let config: AppConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "https://vessels.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.timeout_secs, 60);
        assert_eq!(config.tolerances.eps_abs, 5.0);
        assert_eq!(config.tolerances.eps_pct, 0.05);
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        let result: Result<AppConfig, _> = toml::from_str("[upstream]\n");
        assert!(result.is_err());
    }
}
