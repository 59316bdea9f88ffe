//! Outbound request augmentation for the Ledgerly client.
//!
//! Every request the client sends to the backend carries the stored bearer
//! credential. [`BearerAuth`] does the header work on a plain
//! [`http::Request`]; [`BearerAuthLayer`] wraps it as a `tower` middleware so
//! it can sit in any HTTP client stack.
//!
//! The augmentor reads the raw credential straight from the
//! [`CredentialStore`](ledgerly_storage::CredentialStore). It never decodes
//! it and never asks the session whether it's still valid; the backend is
//! the authority on that.
//!
//! # Feature Flags
//!
//! - `tower` (default): [`BearerAuthLayer`] and [`BearerAuthService`]

mod bearer;
#[cfg(feature = "tower")]
mod layer;

pub use bearer::{BEARER_SCHEME, BearerAuth};
#[cfg(feature = "tower")]
pub use layer::{BearerAuthLayer, BearerAuthService};
