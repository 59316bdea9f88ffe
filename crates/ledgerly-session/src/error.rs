//! Error types for the session layer.

use ledgerly_token::TokenError;

/// Errors from [`Session::claims`](crate::Session::claims).
///
/// This is the only fallible session API. Everything guards and UI code
/// use (`is_authenticated`, `current_role`, the watch channels) folds these
/// cases into `false` / `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Nothing is stored: the user never logged in, or logged out.
    #[error("no credential stored")]
    NoCredential,

    /// A credential is stored but is malformed or expired.
    #[error(transparent)]
    Token(#[from] TokenError),
}
