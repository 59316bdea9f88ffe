//! Unified error type for the Ledgerly client core.

use std::path::PathBuf;

use ledgerly_guard::NavigationError;
use ledgerly_session::SessionError;
use ledgerly_storage::StorageError;
use ledgerly_token::TokenError;

/// Errors loading a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file couldn't be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text isn't valid JSON for the config shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level error that wraps all crate-specific errors.
///
/// Most of the client never returns errors at all (storage and token
/// problems collapse to "logged out"). What's left surfaces here: building
/// the client, loading config, imperative claim inspection, and navigating
/// a broken route table.
#[derive(Debug, thiserror::Error)]
pub enum LedgerlyError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
