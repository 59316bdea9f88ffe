//! The session: single writer of "logged in?" and "as what?".
//!
//! # Two ways to read, one way to write
//!
//! ```text
//!                    ┌──────────── login() / logout() / reload()
//!                    ▼
//!   CredentialStore ──→ Session ──→ watch<bool>          (UI, reactive)
//!        (raw token)       │    └─→ watch<Option<Role>>  (UI, reactive)
//!                          │
//!                          └─→ is_authenticated() / current_role()
//!                              (guards, recomputed on every call)
//! ```
//!
//! The watch channels hold the value derived at the last login/logout. The
//! synchronous methods re-derive from the stored credential every time, so
//! they notice expiry that happened since the last publish. Guards must use
//! the synchronous methods.
//!
//! # Concurrency note
//!
//! Publishing to a `watch` channel is synchronous and needs no runtime:
//! every receiver sees the new value as soon as `login()` returns. There is
//! no lock around the session; `login`/`logout` are the only writers.

use std::fmt;
use std::sync::Arc;

use ledgerly_storage::CredentialStore;
use ledgerly_token::{Claims, Clock, Role, SystemClock, TokenError, role_from_claims, validate};
use tokio::sync::watch;

use crate::{AuthResponse, SessionConfig, SessionError, SessionView};

/// The client's session.
///
/// Construct exactly one per client and share it (`Arc<Session>`) with
/// everything that needs it: guards, the navigator, UI bindings.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ [reads stored credential, publishes initial state]
///   │
///   ├── login(response) ──→ store credential ──→ publish (true, role)
///   │
///   └── logout() ──────────→ remove credential ─→ publish (false, None)
/// ```
pub struct Session {
    store: CredentialStore,
    config: SessionConfig,
    clock: Arc<dyn Clock>,

    /// Replay-latest authentication flag. `watch` keeps only the newest
    /// value, and a fresh receiver sees it immediately.
    authenticated: watch::Sender<bool>,

    /// Replay-latest role, published alongside `authenticated`.
    role: watch::Sender<Option<Role>>,
}

impl Session {
    /// Creates the session over `store`, using the system clock.
    ///
    /// Whatever credential is already stored (from a previous run) decides
    /// the initial published state.
    pub fn new(store: CredentialStore, config: SessionConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Creates the session with an explicit clock.
    pub fn with_clock(
        store: CredentialStore,
        config: SessionConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (authenticated, _) = watch::channel(false);
        let (role, _) = watch::channel(None);
        let session = Self {
            store,
            config,
            clock,
            authenticated,
            role,
        };
        let (is_auth, role) = session.derive();
        session.publish(is_auth, role);
        tracing::debug!(authenticated = is_auth, role = ?role, "session initialised");
        session
    }

    // -- Reads ------------------------------------------------------------

    /// The raw stored credential, if any. Not validated.
    pub fn token(&self) -> Option<String> {
        self.store.get::<String>(&self.config.token_key)
    }

    /// Validated claims for the stored credential.
    ///
    /// # Errors
    /// - [`SessionError::NoCredential`] — nothing stored
    /// - [`SessionError::Token`] — stored credential is malformed or expired
    pub fn claims(&self) -> Result<Claims, SessionError> {
        let token = self.token().ok_or(SessionError::NoCredential)?;
        Ok(validate(&token, self.clock.now())?)
    }

    /// `true` iff a credential is stored, decodes, and is unexpired.
    ///
    /// Recomputed on every call. Never errors: any failure reads as `false`.
    pub fn is_authenticated(&self) -> bool {
        self.checked_claims().is_some()
    }

    /// The role carried by a valid credential, or `None` for a missing,
    /// malformed or expired credential, or one without a known role.
    pub fn current_role(&self) -> Option<Role> {
        self.checked_claims().as_ref().and_then(role_from_claims)
    }

    /// `true` if the current role is exactly `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.current_role() == Some(role)
    }

    /// `true` if the current role is any of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.current_role().is_some_and(|r| roles.contains(&r))
    }

    // -- Writes -----------------------------------------------------------

    /// Stores the credential from a login/register response and publishes
    /// the resulting state.
    pub fn login(&self, response: &AuthResponse) {
        self.login_with_token(&response.token);
    }

    /// Stores a bare credential and publishes the resulting state.
    ///
    /// The published flag is derived from the credential just stored, so a
    /// credential that is already expired (or malformed) publishes `false`.
    pub fn login_with_token(&self, token: &str) {
        self.store.set(&self.config.token_key, token);
        let (is_auth, role) = self.derive();
        self.publish(is_auth, role);
        tracing::info!(authenticated = is_auth, role = ?role, "logged in");
    }

    /// Removes the credential and publishes `false` / `None`.
    pub fn logout(&self) {
        self.store.remove(&self.config.token_key);
        self.publish(false, None);
        tracing::info!("logged out");
    }

    /// Re-derives both values from the store and publishes them.
    ///
    /// Use this when something other than this session changed the stored
    /// credential, e.g. another client sharing the same storage file.
    pub fn reload(&self) {
        let (is_auth, role) = self.derive();
        self.publish(is_auth, role);
        tracing::debug!(authenticated = is_auth, role = ?role, "session reloaded");
    }

    // -- Subscriptions ----------------------------------------------------

    /// Subscribes to authentication-flag changes.
    ///
    /// The receiver starts out holding the current value
    /// (`*rx.borrow()`), and `rx.changed().await` resolves on every later
    /// login/logout.
    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    /// Subscribes to role changes. Same replay-latest semantics as
    /// [`subscribe_authenticated`](Self::subscribe_authenticated).
    pub fn subscribe_role(&self) -> watch::Receiver<Option<Role>> {
        self.role.subscribe()
    }

    /// The storage key holding the credential.
    pub fn token_key(&self) -> &str {
        &self.config.token_key
    }

    // -- Internals --------------------------------------------------------

    /// Claims of the stored credential if it is valid right now. Every
    /// failure is logged at debug level and folded into `None`.
    fn checked_claims(&self) -> Option<Claims> {
        match self.claims() {
            Ok(claims) => Some(claims),
            Err(SessionError::NoCredential) => None,
            Err(SessionError::Token(err)) => {
                match &err {
                    TokenError::Expired { exp, now } => {
                        tracing::debug!(exp, now, "stored credential expired");
                    }
                    TokenError::Malformed(reason) => {
                        tracing::debug!(%reason, "stored credential malformed");
                    }
                }
                None
            }
        }
    }

    fn derive(&self) -> (bool, Option<Role>) {
        match self.checked_claims() {
            Some(claims) => (true, role_from_claims(&claims)),
            None => (false, None),
        }
    }

    fn publish(&self, is_auth: bool, role: Option<Role>) {
        // `send_replace` stores the value even when nobody is subscribed,
        // so later subscribers still get it.
        self.authenticated.send_replace(is_auth);
        self.role.send_replace(role);
    }
}

impl SessionView for Session {
    fn is_authenticated(&self) -> bool {
        Session::is_authenticated(self)
    }

    fn current_role(&self) -> Option<Role> {
        Session::current_role(self)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token_key", &self.config.token_key)
            .field("authenticated", &*self.authenticated.borrow())
            .field("role", &*self.role.borrow())
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
