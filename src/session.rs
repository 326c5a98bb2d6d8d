//! # Session Store
//!
//! Access to the persisted session token. The store is an explicit object
//! handed to the HTTP client at construction; every read and write of the
//! token goes through it.
//!
//! The token lives under the `token` key of the configuration file. Absence
//! means unauthenticated.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{self, Config};

/// Handle to the stored session token.
///
/// Cheap to clone; every operation re-reads or rewrites the backing file, so
/// a token removed by one holder is immediately gone for all of them.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at the default configuration path.
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            path: config::config_path()?,
        })
    }

    /// Open the store at an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing configuration file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the stored token, if any.
    ///
    /// A missing or unreadable config file reads as unauthenticated.
    pub fn token(&self) -> Option<String> {
        Config::load_from(&self.path).ok().and_then(|c| c.token)
    }

    /// Whether a token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store a token, preserving the rest of the configuration.
    pub fn store_token(&self, token: &str) -> Result<()> {
        let mut config = Config::load_or_default(&self.path);
        config.token = Some(token.to_string());
        config.save_to(&self.path)
    }

    /// Remove the stored token, preserving the rest of the configuration.
    pub fn clear_token(&self) -> Result<()> {
        let mut config = Config::load_or_default(&self.path);
        config.token = None;
        config.save_to(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_store(dir: &TempDir) -> SessionStore {
        SessionStore::with_path(dir.path().join("config.json"))
    }

    #[test]
    fn test_missing_file_reads_as_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_store_and_read_token() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);

        store.store_token("tok_abc123").unwrap();
        assert_eq!(store.token().as_deref(), Some("tok_abc123"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clear_token() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);

        store.store_token("tok_abc123").unwrap();
        store.clear_token().unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_clear_preserves_base_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = Config::new_with_url(
            Some("tok_abc123".to_string()),
            "http://stored.example.com".to_string(),
        );
        config.save_to(&path).unwrap();

        let store = SessionStore::with_path(path.clone());
        store.clear_token().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(reloaded.token.is_none());
        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("http://stored.example.com"));
    }

    #[test]
    fn test_clones_share_backing_file() {
        let dir = TempDir::new().unwrap();
        let store = scratch_store(&dir);
        let other = store.clone();

        store.store_token("tok_shared").unwrap();
        assert_eq!(other.token().as_deref(), Some("tok_shared"));

        other.clear_token().unwrap();
        assert!(store.token().is_none());
    }
}
