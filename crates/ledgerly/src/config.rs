//! Client configuration.
//!
//! Every section has a `Default`, and every field is optional in JSON, so
//! a config file only needs the parts it changes:
//!
//! ```json
//! {
//!   "storage": { "kind": "file", "path": "/var/lib/ledgerly/session.json" },
//!   "routes": { "login": "/auth/login" }
//! }
//! ```

use std::path::{Path, PathBuf};

use ledgerly_guard::RouteConfig;
use ledgerly_session::SessionConfig;
use ledgerly_storage::{CredentialStore, FileBackend, StorageError};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

/// Where the credential is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process memory. Gone on restart.
    #[default]
    Memory,
    /// A JSON file, shared by every client pointed at the same path.
    File { path: PathBuf },
}

impl StorageConfig {
    /// Opens the configured backend.
    pub fn open(&self) -> Result<CredentialStore, StorageError> {
        match self {
            Self::Memory => Ok(CredentialStore::in_memory()),
            Self::File { path } => Ok(CredentialStore::new(FileBackend::open(path)?)),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Full configuration for a [`LedgerlyClient`](crate::LedgerlyClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub session: SessionConfig,
    pub routes: RouteConfig,
    pub storage: StorageConfig,
}

impl ClientConfig {
    /// Parses a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded client config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_empty_object_is_default() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.session.token_key, "auth_token");
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn test_from_json_partial_sections() {
        let config = ClientConfig::from_json(
            r#"{
                "session": { "token_key": "ledgerly_token" },
                "routes": { "max_redirects": 4 },
                "storage": { "kind": "file", "path": "/tmp/s.json" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.session.token_key, "ledgerly_token");
        assert_eq!(config.routes.max_redirects, 4);
        assert_eq!(config.routes.login, "/auth/login");
        assert_eq!(
            config.storage,
            StorageConfig::File {
                path: "/tmp/s.json".into()
            }
        );
    }

    #[test]
    fn test_from_json_unknown_storage_kind_fails() {
        let err = ClientConfig::from_json(r#"{"storage": {"kind": "cloud"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_path_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        std::fs::write(&path, r#"{"routes": {"default": "/home"}}"#).unwrap();

        let config = ClientConfig::from_path(&path).unwrap();
        assert_eq!(config.routes.default, "/home");
    }

    #[test]
    fn test_storage_open_file_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig::File {
            path: dir.path().join("nested/session.json"),
        };
        let store = storage.open().unwrap();
        store.set("k", "v");
        assert_eq!(store.get::<String>("k").as_deref(), Some("v"));
    }
}
