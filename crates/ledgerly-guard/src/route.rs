//! Route definitions and the Ledgerly route table.
//!
//! A [`Route`] is one node in a tree. Its `path` is matched against URL
//! segments relative to its parent:
//!
//! - `"dashboard"`: a literal segment
//! - `"customers/:id"`: several segments; `:id` captures whatever is there
//! - `""`: matches without consuming anything (layout or default routes)
//! - `"**"`: matches everything that's left (catch-all)
//!
//! A route either renders a page, redirects, or groups children. Redirect
//! routes match only when they consume the rest of the URL.

use ledgerly_token::Role;
use serde::{Deserialize, Serialize};

use crate::guard::Guard;

// ---------------------------------------------------------------------------
// RouteData
// ---------------------------------------------------------------------------

/// Metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteData {
    /// Roles allowed through the [`role_guard`](crate::role_guard). Declared
    /// explicitly, never inferred from the path.
    pub roles: Option<Vec<Role>>,

    /// Display title for the page.
    pub title: Option<String>,
}

impl RouteData {
    /// Metadata declaring `roles` and no title.
    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: Some(roles.into_iter().collect()),
            title: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A node in the route tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    /// Segments matched relative to the parent; see the module docs.
    pub path: String,
    /// Run parent-first, in order, before anything under this route activates.
    pub guards: Vec<Guard>,
    pub data: RouteData,
    /// Routes matched against what's left of the URL after this one.
    pub children: Vec<Route>,
    /// Relative targets resolve against the parent route's URL; targets
    /// starting with `/` are absolute.
    pub redirect_to: Option<String>,
    /// The page this route renders when it's the last matched route.
    pub page: Option<String>,
}

impl Route {
    /// A route that renders `page`.
    pub fn page(path: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page: Some(page.into()),
            ..Self::default()
        }
    }

    /// A route that redirects to `target`.
    pub fn redirect(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            redirect_to: Some(target.into()),
            ..Self::default()
        }
    }

    /// A route grouping `children` under `path`.
    pub fn parent(path: impl Into<String>, children: Vec<Route>) -> Self {
        Self {
            path: path.into(),
            children,
            ..Self::default()
        }
    }

    /// Adds `guard` after any guards already on this route.
    pub fn guarded(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Declares the roles allowed by a [`Guard::Role`] on this route.
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.data.roles = Some(roles.into_iter().collect());
        self
    }

    /// Sets the page title.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.data.title = Some(title.into());
        self
    }

    /// `true` for the `**` route.
    pub fn is_catch_all(&self) -> bool {
        self.path == "**"
    }

    /// The path split into its non-empty segments.
    pub(crate) fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}

// ---------------------------------------------------------------------------
// RouteTable
// ---------------------------------------------------------------------------

/// The top-level routes, tried in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// A table trying `routes` in order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The top-level routes.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The Ledgerly application's routes.
    ///
    /// ```text
    /// /auth                  public   login, register
    /// /                      auth     dashboard
    /// ├── admin              [Admin]          admins, owners
    /// ├── owner              [Owner, Admin]   staff, shops, payments, ...
    /// └── staff              [Staff]          dashboard, customers/:id, ...
    /// /**                    redirect to /
    /// ```
    pub fn ledgerly() -> Self {
        let auth = Route::parent(
            "auth",
            vec![
                Route::page("login", "login").titled("Sign in"),
                Route::page("register", "register").titled("Create account"),
                Route::redirect("", "login"),
            ],
        )
        .guarded(Guard::Public);

        let admin = Route::parent(
            "admin",
            vec![
                Route::page("admins", "admin-management"),
                Route::page("owners", "owner-management"),
                Route::redirect("", "admins"),
            ],
        )
        .guarded(Guard::Role)
        .roles([Role::Admin]);

        let owner = Route::parent(
            "owner",
            vec![
                Route::page("staff", "staff-management"),
                Route::page("shops", "shop-management"),
                Route::page("assign-shop", "assign-shop"),
                Route::page("purchases", "purchases"),
                Route::page("payments", "owner-payments"),
                Route::page("payments/status", "owner-payment-status"),
                Route::page("exports", "exports"),
                Route::page("profile", "owner-profile"),
                Route::page("business", "business-details"),
                Route::redirect("", "staff"),
            ],
        )
        .guarded(Guard::Role)
        .roles([Role::Owner, Role::Admin]);

        let staff = Route::parent(
            "staff",
            vec![
                Route::page("dashboard", "staff-dashboard"),
                Route::page("customers", "customer-management"),
                Route::page("customers/:id", "customer-detail"),
                Route::page("profile", "staff-profile"),
                Route::page("payments", "staff-payments"),
                Route::page("payments/status", "staff-payment-status"),
                Route::page("ledger/search", "ledger-search"),
                Route::redirect("", "dashboard"),
            ],
        )
        .guarded(Guard::Role)
        .roles([Role::Staff]);

        let main = Route::parent(
            "",
            vec![
                Route::redirect("", "dashboard"),
                Route::page("dashboard", "dashboard").titled("Dashboard"),
                admin,
                owner,
                staff,
            ],
        )
        .guarded(Guard::Auth);

        Self::new(vec![auth, main, Route::redirect("**", "/")])
    }
}
