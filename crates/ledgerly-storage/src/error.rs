//! Error types for the storage layer.
//!
//! These errors only ever travel between a [`StorageBackend`] and the
//! [`CredentialStore`] that wraps it. The store converts every one of them
//! into a no-op or an absent value, so nothing above this crate has to
//! handle them.
//!
//! [`StorageBackend`]: crate::StorageBackend
//! [`CredentialStore`]: crate::CredentialStore

use std::path::PathBuf;

/// Errors a storage backend can report.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// There is no usable persistence backend at all (for example a
    /// headless environment, or a storage directory that can't be created).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing data exists but can't be parsed.
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),

    /// A value could not be serialized before being written.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
