//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first failed attempt of a query
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Serve placeholder chart data when a trend section is unavailable
    #[serde(default = "default_placeholder_fallback")]
    pub placeholder_fallback: bool,
}

pub const DEFAULT_API_BASE_URL: &str = "https://stagingapi.iprescribe.online/api/v1";

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_retry_attempts() -> u32 {
    2
}

fn default_placeholder_fallback() -> bool {
    true
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            placeholder_fallback: default_placeholder_fallback(),
        }
    }
}

impl ApiSettings {
    /// Settings pointing at a specific base URL, everything else default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Durable client-side storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("iprescribe").to_string_lossy().to_string())
        .unwrap_or_else(|| "./iprescribe_data".to_string())
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("iprescribe").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = var("IPRESCRIBE_API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("IPRESCRIBE_API_TIMEOUT") {
            match timeout.parse() {
                Ok(ms) => self.api.timeout_ms = ms,
                Err(_) => tracing::warn!("Ignoring invalid IPRESCRIBE_API_TIMEOUT: {}", timeout),
            }
        }
        if let Some(attempts) = var("IPRESCRIBE_API_RETRY_ATTEMPTS") {
            match attempts.parse() {
                Ok(n) => self.api.retry_attempts = n,
                Err(_) => {
                    tracing::warn!("Ignoring invalid IPRESCRIBE_API_RETRY_ATTEMPTS: {}", attempts)
                }
            }
        }
        if let Some(fallback) = var("IPRESCRIBE_PLACEHOLDER_FALLBACK") {
            self.api.placeholder_fallback = fallback.to_lowercase() != "false" && fallback != "0";
        }

        // Storage overrides
        if let Some(data_dir) = var("IPRESCRIBE_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Logging overrides
        if let Some(level) = var("IPRESCRIBE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("IPRESCRIBE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# iPrescribe Admin Configuration
#
# Environment variables override these settings:
# - IPRESCRIBE_API_BASE_URL
# - IPRESCRIBE_API_TIMEOUT
# - IPRESCRIBE_API_RETRY_ATTEMPTS
# - IPRESCRIBE_PLACEHOLDER_FALLBACK
# - IPRESCRIBE_DATA_DIR
# - IPRESCRIBE_LOG_LEVEL
# - IPRESCRIBE_LOG_FORMAT

[api]
# Admin API base URL
base_url = "https://stagingapi.iprescribe.online/api/v1"

# Request timeout in milliseconds
timeout_ms = 10000

# Retries after a failed query (delay doubles from 1s, capped at 30s)
retry_attempts = 2

# Serve placeholder chart data when trend sections are unavailable
placeholder_fallback = true

[storage]
# Directory holding the persisted session (auth record and token)
data_dir = "~/.local/share/iprescribe"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/iprescribe/admin.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.api.retry_attempts, 2);
        assert!(config.api.placeholder_fallback);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.retry_attempts, 2);
        assert_eq!(config.storage.data_dir, "~/.local/share/iprescribe");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[api]\ntimeout_ms = 2500\n").unwrap();
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("IPRESCRIBE_API_BASE_URL", "http://127.0.0.1:9000/api/v1"),
            ("IPRESCRIBE_API_TIMEOUT", "1500"),
            ("IPRESCRIBE_API_RETRY_ATTEMPTS", "not-a-number"),
            ("IPRESCRIBE_PLACEHOLDER_FALLBACK", "false"),
            ("IPRESCRIBE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api/v1");
        assert_eq!(config.api.timeout_ms, 1500);
        assert_eq!(config.api.retry_attempts, 2);
        assert!(!config.api.placeholder_fallback);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/iprescribe.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
