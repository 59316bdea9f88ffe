//! # Ledgerly
//!
//! Session, role-based navigation and request authentication core for the
//! Ledgerly client.
//!
//! The client keeps one bearer credential in persistent storage and derives
//! everything else from it on demand: whether the user is logged in, which
//! role they hold, which routes they may enter, and what goes in the
//! `Authorization` header. Any doubt about the credential (missing,
//! malformed, expired, storage down) means "logged out".
//!
//! The sub-crates, all re-exported here:
//!
//! - [`ledgerly_storage`]: persistent key/value storage for the credential
//! - [`ledgerly_token`]: credential decoding, claims, roles, expiry
//! - [`ledgerly_session`]: login/logout and observable session state
//! - [`ledgerly_guard`]: navigation guards and the route table
//! - [`ledgerly_http`]: bearer header middleware
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ledgerly::prelude::*;
//!
//! # fn main() -> Result<(), LedgerlyError> {
//! let client = LedgerlyClient::builder().build()?;
//!
//! client.login(&AuthResponse::from_json(r#"{"token":"..."}"#).map_err(ConfigError::from)?);
//! let nav = client.navigate("/")?;
//! println!("landed on {}", nav.path);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::{LedgerlyClient, LedgerlyClientBuilder};
pub use config::{ClientConfig, StorageConfig};
pub use error::{ConfigError, LedgerlyError};

pub use ledgerly_guard;
pub use ledgerly_http;
pub use ledgerly_session;
pub use ledgerly_storage;
pub use ledgerly_token;

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::{ClientConfig, ConfigError, LedgerlyClient, LedgerlyError, StorageConfig};

    pub use ledgerly_guard::{
        Guard, GuardDecision, Navigation, NavigationError, Navigator, Route, RouteConfig,
        RouteData, RouteTable, auth_guard, public_guard, role_guard,
    };
    pub use ledgerly_http::{BearerAuth, BearerAuthLayer, BearerAuthService};
    pub use ledgerly_session::{AuthResponse, Session, SessionConfig, SessionView};
    pub use ledgerly_storage::{CredentialStore, FileBackend, MemoryBackend, StorageBackend};
    pub use ledgerly_token::{Claims, Clock, FixedClock, Role, SystemClock};
}
