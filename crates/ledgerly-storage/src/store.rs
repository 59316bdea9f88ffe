//! The credential store: a typed, never-failing facade over a backend.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{MemoryBackend, StorageBackend, StorageError};

/// A cheap, cloneable handle to the client's persistent key/value storage.
///
/// Every value is JSON-encoded on [`set`](Self::set) and decoded on
/// [`get`](Self::get), so a string `abc` is stored as `"abc"` (quotes
/// included). Backend failures never reach the caller:
///
/// | Situation | `get` | `set` / `remove` / `clear` |
/// |---|---|---|
/// | backend unavailable or failing | `None` | no-op |
/// | stored data isn't valid JSON for `T` | `None` | n/a |
/// | value can't be serialized | n/a | no-op |
///
/// Each failure is logged at `warn` (or `debug` for malformed reads) and
/// otherwise swallowed.
///
/// Clones share the same backend: the session writes through one clone and
/// the request augmentor reads through another.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn StorageBackend>,
}

impl CredentialStore {
    /// Wraps an existing backend.
    pub fn new(backend: impl StorageBackend) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Wraps a backend that is already shared.
    pub fn from_shared(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// A store over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Serializes `value` and stores it under `key`.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(source) => {
                let err = StorageError::Encode {
                    key: key.to_string(),
                    source,
                };
                tracing::warn!(error = %err, "storage write skipped");
                return;
            }
        };
        if let Err(e) = self.backend.set_item(key, &encoded) {
            tracing::warn!(key, error = %e, "storage write failed");
        }
    }

    /// Reads and deserializes the value stored under `key`.
    ///
    /// Returns `None` when the key is missing, the backend is unavailable,
    /// or the stored text doesn't decode as a `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "stored value is malformed, treating as absent");
                None
            }
        }
    }

    /// Removes the value stored under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            tracing::warn!(key, error = %e, "storage remove failed");
        }
    }

    /// Removes every stored value.
    pub fn clear(&self) {
        if let Err(e) = self.backend.clear() {
            tracing::warn!(error = %e, "storage clear failed");
        }
    }
}

impl fmt::Debug for CredentialStore {
    // Stored values are credentials; keep them out of debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
