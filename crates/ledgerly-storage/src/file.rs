//! A durable backend that keeps all entries in a single JSON file.
//!
//! This is the client-side equivalent of browser local storage: entries
//! outlive the process, so a restarted client picks up the session it left
//! behind. The file holds one JSON object mapping keys to raw values:
//!
//! ```json
//! { "auth_token": "\"eyJhbGciOi...\"" }
//! ```
//!
//! Every operation goes back to disk. Nothing is cached, so a second client
//! sharing the same file (another "tab") sees changes on its next read.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::{StorageBackend, StorageError};

type Entries = BTreeMap<String, String>;

/// A [`StorageBackend`] persisted to a JSON file.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileBackend {
    /// Opens (or prepares to create) the storage file at `path`.
    ///
    /// The parent directory is created if needed. The file itself is only
    /// created on the first write.
    ///
    /// # Errors
    /// Returns [`StorageError::Unavailable`] if the parent directory can't
    /// be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Unavailable(format!(
                    "cannot create {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// The file this backend reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        if text.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            StorageError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    /// Loads the entries for a write. A corrupt file is discarded rather
    /// than blocking every future write.
    fn load_for_write(&self) -> Result<Entries, StorageError> {
        match self.load() {
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(%reason, "discarding corrupt storage file");
                Ok(Entries::new())
            }
            other => other,
        }
    }

    fn persist(&self, entries: &Entries) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(entries).map_err(|e| {
            StorageError::Corrupt(format!("cannot serialize entries: {e}"))
        })?;
        // Write next to the target and rename over it, so a crash mid-write
        // never leaves a truncated file behind.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::io(&self.path, e))
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut entries = self.load_for_write()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }
}
