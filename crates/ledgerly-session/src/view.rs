//! The read-only seam guards depend on.
//!
//! Guards don't need a whole [`Session`](crate::Session), just two
//! synchronous questions. Putting those behind a trait lets guard code be
//! tested against a two-field fake, and lets an embedding application plug
//! in its own session type.

use ledgerly_token::Role;

/// A synchronous, read-only view of the current session.
///
/// Both methods must recompute from the current credential rather than
/// return a cached value: a token can expire between two navigations
/// without anything being published.
pub trait SessionView {
    /// `true` iff a credential is stored, decodes, and hasn't expired.
    fn is_authenticated(&self) -> bool;

    /// The role carried by a valid credential, or `None`.
    fn current_role(&self) -> Option<Role>;
}

/// A shared reference to a view is a view. This lets `&Session` and
/// `Arc<Session>` be handed to guards directly.
impl<T: SessionView + ?Sized> SessionView for &T {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }

    fn current_role(&self) -> Option<Role> {
        (**self).current_role()
    }
}

impl<T: SessionView + ?Sized> SessionView for std::sync::Arc<T> {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }

    fn current_role(&self) -> Option<Role> {
        (**self).current_role()
    }
}
