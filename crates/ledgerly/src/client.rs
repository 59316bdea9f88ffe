//! `LedgerlyClient` builder and the assembled client.
//!
//! The client owns the single [`Session`] and hands out the pieces wired to
//! it: a [`Navigator`] for route changes and a [`BearerAuthLayer`] for the
//! HTTP stack. Nothing here is global; construct one client at startup and
//! pass it (or its parts) to whatever needs them.

use std::sync::Arc;

use ledgerly_guard::{Navigation, NavigationError, Navigator, RouteTable};
use ledgerly_http::{BearerAuth, BearerAuthLayer};
use ledgerly_session::{AuthResponse, Session};
use ledgerly_storage::{CredentialStore, StorageBackend};
use ledgerly_token::{Clock, Role, SystemClock};
use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::error::LedgerlyError;

/// Builder for a [`LedgerlyClient`].
///
/// # Example
///
/// ```rust,ignore
/// let client = LedgerlyClient::builder()
///     .config(ClientConfig::from_path("ledgerly.json")?)
///     .build()?;
/// ```
pub struct LedgerlyClientBuilder {
    config: ClientConfig,
    routes: RouteTable,
    clock: Arc<dyn Clock>,
    backend: Option<Arc<dyn StorageBackend>>,
}

impl LedgerlyClientBuilder {
    /// Creates a builder with default config and the Ledgerly route table.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            routes: RouteTable::ledgerly(),
            clock: Arc::new(SystemClock),
            backend: None,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the route table.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Sets the clock used for expiry checks.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Uses `backend` instead of the one named in the storage config.
    pub fn backend(mut self, backend: Arc<dyn StorageBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Opens storage and assembles the client.
    ///
    /// # Errors
    ///
    /// [`LedgerlyError::Storage`] if the configured storage can't be opened.
    pub fn build(self) -> Result<LedgerlyClient, LedgerlyError> {
        let store = match self.backend {
            Some(backend) => CredentialStore::from_shared(backend),
            None => self.config.storage.open()?,
        };

        let auth = BearerAuth::new(store.clone(), &self.config.session.token_key);
        let session = Arc::new(Session::with_clock(
            store.clone(),
            self.config.session.clone(),
            self.clock,
        ));
        let navigator = Navigator::new(self.routes, self.config.routes.clone());

        tracing::info!(
            storage = ?self.config.storage,
            authenticated = session.is_authenticated(),
            "ledgerly client ready"
        );

        Ok(LedgerlyClient {
            store,
            session,
            navigator,
            auth,
        })
    }
}

impl Default for LedgerlyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The assembled client core.
///
/// Cheap to clone: every part is a shared handle or small value.
#[derive(Debug, Clone)]
pub struct LedgerlyClient {
    store: CredentialStore,
    session: Arc<Session>,
    navigator: Navigator,
    auth: BearerAuth,
}

impl LedgerlyClient {
    pub fn builder() -> LedgerlyClientBuilder {
        LedgerlyClientBuilder::new()
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Stores the credential from a login or registration response.
    pub fn login(&self, response: &AuthResponse) {
        self.session.login(response);
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_role(&self) -> Option<Role> {
        self.session.current_role()
    }

    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.session.subscribe_authenticated()
    }

    pub fn subscribe_role(&self) -> watch::Receiver<Option<Role>> {
        self.session.subscribe_role()
    }

    /// Navigates to `url` as the current session.
    pub fn navigate(&self, url: &str) -> Result<Navigation, NavigationError> {
        self.navigator.navigate(url, &*self.session)
    }

    /// A `tower` layer that adds the stored credential to outbound requests.
    pub fn auth_layer(&self) -> BearerAuthLayer {
        BearerAuthLayer::new(self.auth.clone())
    }

    pub fn bearer_auth(&self) -> &BearerAuth {
        &self.auth
    }
}
