//! Error types for the token layer.

/// Why a credential can't be trusted locally.
///
/// These never escape to guards or UI code: the session layer turns any
/// `TokenError` into "not authenticated, no role".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token isn't a three-part `header.payload.signature` string, or its
    /// payload isn't base64url-encoded JSON claims.
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// The token decoded fine but its validity window has closed.
    /// `exp` and `now` are both epoch seconds.
    #[error("credential expired at {exp} (now {now})")]
    Expired { exp: u64, now: u64 },
}

impl TokenError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}
