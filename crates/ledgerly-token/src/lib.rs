//! Bearer token decoding for the Ledgerly client.
//!
//! The server hands the client a compact three-part token
//! (`header.payload.signature`). This crate reads it **without** network
//! access and without verifying the signature; that's the server's job on
//! every request. The client only needs to answer two questions locally:
//!
//! - **Is it still valid?** ([`decode`], [`is_expired`], [`validate`])
//! - **What role does it carry?** ([`role_from_claims`], [`Role`])
//!
//! Everything here is pure and stateless: the same token and the same
//! clock reading always give the same answer.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session (above)  ← turns these Results into plain bool / Option<Role>
//!     ↕
//! Token (this crate)  ← token string → Claims → expiry + role
//! ```

mod claims;
mod clock;
mod codec;
mod error;

pub use claims::{Claims, ROLE_PREFIX, Role, role_from_claims};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{decode, encode_unsigned, is_expired, validate};
pub use error::TokenError;
