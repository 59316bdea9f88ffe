//! Attaching the stored credential to a request.

use http::header::{AUTHORIZATION, HeaderValue};
use http::Request;
use ledgerly_storage::CredentialStore;

/// Authorization scheme prefix, including the separating space.
pub const BEARER_SCHEME: &str = "Bearer ";

/// Adds `Authorization: Bearer <credential>` to outbound requests.
///
/// Cheap to clone: the store is a shared handle.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    store: CredentialStore,
    key: String,
}

impl BearerAuth {
    /// Reads the credential stored under `key` in `store`.
    pub fn new(store: CredentialStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header value for the credential currently stored, if any.
    ///
    /// `None` when nothing is stored, the stored value is empty, or it
    /// can't be carried in a header.
    pub fn header_value(&self) -> Option<HeaderValue> {
        let token = self
            .store
            .get::<String>(&self.key)
            .filter(|t| !t.is_empty())?;

        match HeaderValue::try_from(format!("{BEARER_SCHEME}{token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(_) => {
                tracing::warn!(key = %self.key, "stored credential is not a valid header value, skipping");
                None
            }
        }
    }

    /// Adds the authorization header to `request` when a credential is
    /// stored. Otherwise leaves the request exactly as it was.
    ///
    /// Only the `Authorization` header is touched; an existing one is
    /// replaced. Method, URI, other headers and body are left alone.
    pub fn apply<B>(&self, request: &mut Request<B>) {
        if let Some(value) = self.header_value() {
            request.headers_mut().insert(AUTHORIZATION, value);
        } else {
            tracing::trace!(uri = %request.uri(), "no credential, request sent anonymously");
        }
    }
}
