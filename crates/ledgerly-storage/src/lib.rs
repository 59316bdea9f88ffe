//! Credential storage for the Ledgerly client.
//!
//! This crate is the bottom of the session stack. It knows nothing about
//! tokens, roles or routes; it only persists small string values under
//! string keys, the way browser local storage does:
//!
//! - **Backends** ([`StorageBackend`] trait) — where bytes actually live:
//!   [`MemoryBackend`] for tests, [`FileBackend`] for durable storage that
//!   survives a process restart, [`UnavailableBackend`] for environments
//!   with no storage at all.
//! - **Store** ([`CredentialStore`]) — the handle everyone else uses. It
//!   JSON-encodes values and swallows every backend failure, so callers
//!   never see an error from storage.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session (above)          ← reads/writes the credential through CredentialStore
//! Request augmentor (above) ← reads the raw credential on every request
//!     ↕
//! Storage (this crate)     ← persists strings, never fails loudly
//! ```

mod backend;
mod error;
mod file;
mod store;

pub use backend::{MemoryBackend, StorageBackend, UnavailableBackend};
pub use error::StorageError;
pub use file::FileBackend;
pub use store::CredentialStore;
