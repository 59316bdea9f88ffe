//! Session state for the Ledgerly client.
//!
//! This crate owns the answer to "is someone logged in, and as what?":
//!
//! 1. **Login / logout** — writing and clearing the credential
//!    ([`Session::login`], [`Session::logout`])
//! 2. **Synchronous checks** — recomputed from the stored credential on
//!    every call, for guards and imperative code ([`SessionView`])
//! 3. **Reactive state** — replay-latest channels UI code can subscribe to
//!    ([`Session::subscribe_authenticated`], [`Session::subscribe_role`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Guards / UI (above)  ← read through SessionView or watch receivers
//!     ↕
//! Session Layer (this crate)  ← single writer of the auth flag and role
//!     ↕
//! Token + Storage (below)  ← decode claims, persist the raw credential
//! ```

mod config;
mod error;
mod response;
mod state;
mod view;

pub use config::{DEFAULT_TOKEN_KEY, SessionConfig};
pub use error::SessionError;
pub use response::AuthResponse;
pub use state::Session;
pub use view::SessionView;
