//! The storage backend seam and its two in-process implementations.
//!
//! A backend is deliberately dumb: string keys, string values, four
//! operations. Encoding, decoding and error swallowing all happen one layer
//! up in [`CredentialStore`](crate::CredentialStore).

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::StorageError;

/// A synchronous key/value persistence backend.
///
/// # Trait bounds
///
/// - `Send + Sync` → one backend is shared (behind an `Arc`) by the session
///   and the request augmentor, which may live on different threads.
/// - `'static` → the backend owns its data; it lives as long as the client.
///
/// Every method is synchronous by contract. A backend over slow or
/// asynchronous storage must cache the last-known values in memory so
/// reads stay synchronous.
pub trait StorageBackend: Send + Sync + 'static {
    /// Returns the raw value stored under `key`, or `Ok(None)` if the key
    /// has never been set (or was removed).
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Removes every key.
    fn clear(&self) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// MemoryBackend
// ---------------------------------------------------------------------------

/// A backend that keeps everything in a process-local map.
///
/// Values survive as long as the backend does, which makes it the right
/// choice for tests and for clients that should forget their session on
/// exit.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.write().clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// UnavailableBackend
// ---------------------------------------------------------------------------

/// A backend for environments without any storage.
///
/// Every operation fails with [`StorageError::Unavailable`]. Paired with
/// [`CredentialStore`](crate::CredentialStore) this gives the "nothing is
/// ever stored, nothing ever throws" behavior of a client running where
/// local storage doesn't exist.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    /// Creates a backend that reports `reason` on every operation.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StorageError {
        StorageError::Unavailable(self.reason.clone())
    }
}

impl StorageBackend for UnavailableBackend {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(self.error())
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(self.error())
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(self.error())
    }

    fn clear(&self) -> Result<(), StorageError> {
        Err(self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_then_get_returns_value() {
        let backend = MemoryBackend::new();

        backend.set_item("auth_token", "\"abc\"").unwrap();

        assert_eq!(
            backend.get_item("auth_token").unwrap().as_deref(),
            Some("\"abc\"")
        );
    }

    #[test]
    fn test_memory_get_missing_key_returns_none() {
        let backend = MemoryBackend::new();

        assert_eq!(backend.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_set_replaces_previous_value() {
        let backend = MemoryBackend::new();
        backend.set_item("k", "1").unwrap();

        backend.set_item("k", "2").unwrap();

        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("2"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_memory_remove_missing_key_is_ok() {
        let backend = MemoryBackend::new();

        assert!(backend.remove_item("missing").is_ok());
    }

    #[test]
    fn test_memory_clear_removes_everything() {
        let backend = MemoryBackend::new();
        backend.set_item("a", "1").unwrap();
        backend.set_item("b", "2").unwrap();

        backend.clear().unwrap();

        assert!(backend.is_empty());
    }

    #[test]
    fn test_unavailable_every_operation_fails() {
        let backend = UnavailableBackend::new("headless");

        assert!(matches!(
            backend.get_item("k"),
            Err(StorageError::Unavailable(reason)) if reason == "headless"
        ));
        assert!(backend.set_item("k", "v").is_err());
        assert!(backend.remove_item("k").is_err());
        assert!(backend.clear().is_err());
    }
}
