//! # Configuration Management
//!
//! This module handles loading and saving CLI configuration: the stored
//! session token and the API base URL.
//!
//! ## Configuration File Location
//!
//! All platforms: `$HOME/.config/ragdoc/config.json`
//! (`$XDG_CONFIG_HOME/ragdoc/config.json` when set).
//!
//! On Windows, uses `%USERPROFILE%\.config\ragdoc\config.json` if `$HOME`
//! is not set.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default API base URL
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable for overriding the base URL
const BASE_URL_ENV_VAR: &str = "RAGDOC_BASE_URL";

/// CLI configuration
///
/// Stores the session token and the base URL of the backend.
///
/// # Example
///
/// ```rust
/// use ragdoc::config::Config;
///
/// let config = Config::new(Some("tok_abc123".to_string()));
/// assert!(config.token.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Session token issued by the login surface. `None` means
    /// unauthenticated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Base URL for the API (stored in config file)
    #[serde(default = "stored_default_base_url")]
    stored_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            stored_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Default base URL for storage (without env var override)
fn stored_default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Config {
    /// Create a new configuration with an optional session token
    ///
    /// Uses the default base URL.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            stored_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new configuration with a token and custom base URL
    pub fn new_with_url(token: Option<String>, base_url: String) -> Self {
        Self {
            token,
            stored_base_url: base_url,
        }
    }

    /// Get the effective base URL
    ///
    /// The `RAGDOC_BASE_URL` environment variable takes precedence over the
    /// config file.
    pub fn base_url(&self) -> String {
        std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| self.stored_base_url.clone())
    }

    /// Load configuration from a config file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(_)` - Configuration file not found or invalid
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not
    /// exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_default()
    }

    /// Save configuration to a config file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Get the default base URL
///
/// Checks the `RAGDOC_BASE_URL` environment variable first, then falls back
/// to the default.
pub fn default_base_url() -> String {
    std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs_config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("ragdoc").join("config.json"))
}

/// Get the config directory
///
/// Uses `$HOME/.config` on all platforms for consistency.
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .or_else(|| std::env::var("USERPROFILE").ok())
                .map(|h| PathBuf::from(h).join(".config"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new(Some("tok_test123".to_string()));
        assert_eq!(config.token.as_deref(), Some("tok_test123"));
    }

    #[test]
    fn test_config_default_has_no_token() {
        let config = Config::default();
        assert!(config.token.is_none());
    }

    #[test]
    fn test_config_serialization_omits_missing_token() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("token"));
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{"token":"tok_test123","stored_base_url":"https://api.example.com"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.token.as_deref(), Some("tok_test123"));
        assert_eq!(config.stored_base_url, "https://api.example.com");
    }

    #[test]
    fn test_config_deserialization_default_url() {
        let json = r#"{"token":"tok_test123"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.token.as_deref(), Some("tok_test123"));
        assert_eq!(config.stored_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ragdoc").join("config.json");

        let config = Config::new_with_url(
            Some("tok_save_load".to_string()),
            "http://test.example.com".to_string(),
        );
        config.save_to(&config_path).unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("tok_save_load"));
        assert_eq!(loaded.stored_base_url, "http://test.example.com");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&temp_dir.path().join("missing.json"));
        assert!(config.token.is_none());
        assert_eq!(config.stored_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_var_takes_precedence() {
        let config = Config::new_with_url(None, "http://stored.example.com".to_string());

        env::set_var(BASE_URL_ENV_VAR, "http://env.example.com");
        assert_eq!(config.base_url(), "http://env.example.com");
        assert_eq!(default_base_url(), "http://env.example.com");

        env::remove_var(BASE_URL_ENV_VAR);
        assert_eq!(config.base_url(), "http://stored.example.com");
    }
}
