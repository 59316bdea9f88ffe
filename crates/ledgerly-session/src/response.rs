//! The login/register response body, as far as the session cares.
//!
//! Ledgerly doesn't issue credentials itself; the server's `/auth/login`
//! and `/auth/register` endpoints do. Their response carries the credential
//! plus a pile of profile fields (`userId`, `username`, `email`,
//! `firstName`, ...). The session only needs the credential, so that's all
//! this type keeps; serde silently drops everything else.

use serde::{Deserialize, Serialize};

/// The part of an authentication response the session consumes.
///
/// ```json
/// { "token": "eyJ...", "tokenType": "Bearer", "userId": 1, "username": "jo" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The raw bearer credential. Also accepted under the name
    /// `credential`.
    #[serde(alias = "credential")]
    pub token: String,

    /// The scheme the server expects, normally `"Bearer"`. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl AuthResponse {
    /// A response carrying just `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: None,
        }
    }

    /// Parses a response body.
    ///
    /// # Errors
    /// Returns the `serde_json` error if the body isn't JSON or has no
    /// `token` (or `credential`) field.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}
