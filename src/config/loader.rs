//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml
//! structure. A missing file falls back to defaults so the tracker works
//! out of the box.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::refresh_gate::DEFAULT_COOLDOWN_MINUTES;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub refresh: RefreshSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Quote provider configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSection {
    /// Base URL of the Eastmoney mobile fund API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Local storage configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    /// Data directory for the holdings file and refresh stamp (supports ~)
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

/// Refresh throttle configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSection {
    /// Minimum minutes between refresh operations
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: i64,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_api_url() -> String {
    "https://fundmobapi.eastmoney.com/FundMNewApi".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_data_dir() -> String {
    "~/.fundwatch".to_string()
}

fn default_cooldown_minutes() -> i64 {
    DEFAULT_COOLDOWN_MINUTES
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            cooldown_minutes: default_cooldown_minutes(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl StorageSection {
    /// Data directory with `~` expanded.
    pub fn expanded_data_dir(&self) -> String {
        shellexpand::tilde(&self.data_dir).to_string()
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file; defaults when the file is absent.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_url cannot be empty".to_string(),
            ));
        }

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.storage.data_dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "data_dir cannot be empty".to_string(),
            ));
        }

        if self.refresh.cooldown_minutes <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "cooldown_minutes must be > 0, got {}",
                self.refresh.cooldown_minutes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh.cooldown_minutes, 30);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("/definitely/not/here.toml").unwrap();
        assert_eq!(config.provider.max_retries, 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[refresh]\ncooldown_minutes = 5").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.refresh.cooldown_minutes, 5);
        assert_eq!(config.provider.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_cooldown_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[refresh]\ncooldown_minutes = 0").unwrap();

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
