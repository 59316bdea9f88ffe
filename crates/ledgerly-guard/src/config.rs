//! Redirect targets used by the guards.

use ledgerly_token::Role;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RouteConfig
// ---------------------------------------------------------------------------

/// Where guards send users they turn away.
///
/// The defaults match the Ledgerly route table: login lives under `/auth`,
/// each role family has its own landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Where [`auth_guard`](crate::auth_guard) sends unauthenticated users.
    pub login: String,

    /// Where [`role_guard`](crate::role_guard) sends users whose role
    /// doesn't fit.
    pub default: String,

    /// Landing page for admins, used by [`public_guard`](crate::public_guard).
    pub admin_home: String,

    /// Landing page for owners.
    pub owner_home: String,

    /// Landing page for every other authenticated user (staff, or a valid
    /// token without a recognised role).
    pub default_home: String,

    /// Hard cap on redirects followed by one navigation.
    pub max_redirects: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: "/auth/login".to_string(),
            default: "/".to_string(),
            admin_home: "/admin".to_string(),
            owner_home: "/owner".to_string(),
            default_home: "/dashboard".to_string(),
            max_redirects: 8,
        }
    }
}

impl RouteConfig {
    /// The landing page for `role`. `None` shares the staff landing page.
    pub fn landing_for(&self, role: Option<Role>) -> &str {
        match role {
            Some(Role::Admin) => &self.admin_home,
            Some(Role::Owner) => &self.owner_home,
            Some(Role::Staff) | None => &self.default_home,
        }
    }
}
