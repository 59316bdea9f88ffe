//! Error types for navigation.
//!
//! Guards themselves never fail; they allow or redirect. These errors only
//! come out of the [`Navigator`](crate::Navigator), and only for a broken
//! route table.

/// Errors that can occur while resolving a navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// No route matches the URL and the table has no `**` catch-all.
    #[error("no route matches {0}")]
    NotFound(String),

    /// Redirects kept bouncing. Usually two guards sending users to each
    /// other's routes.
    #[error("navigation to {url} exceeded {hops} redirects")]
    RedirectLoop { url: String, hops: usize },
}
