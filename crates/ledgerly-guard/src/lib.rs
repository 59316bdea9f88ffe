//! Navigation guards and route resolution for the Ledgerly client.
//!
//! Every screen in the client sits behind a route, and every route can
//! declare guards that run **synchronously** before it activates:
//!
//! - [`auth_guard`]: only for logged-in users; everyone else goes to login
//! - [`role_guard`]: only for users whose role the route lists
//! - [`public_guard`]: only for logged-out users (login, register);
//!   logged-in users go to their role's landing page
//!
//! On top of the guards sits a small router: a [`Route`] tree (see
//! [`RouteTable::ledgerly`] for the application's table) and a
//! [`Navigator`] that resolves a URL, runs the guards along the matched
//! branch, and follows redirects until something activates.
//!
//! # Key types
//!
//! - [`GuardDecision`]: allow, or redirect somewhere else
//! - [`Guard`]: which of the three guards a route uses
//! - [`RouteData`]: per-route metadata (declared roles, title)
//! - [`RouteConfig`]: where the guards send people
//! - [`Navigation`] / [`NavigationError`]: the outcome of a navigation

mod config;
mod error;
mod guard;
mod navigator;
mod route;

pub use config::RouteConfig;
pub use error::NavigationError;
pub use guard::{Guard, GuardDecision, auth_guard, public_guard, role_guard};
pub use navigator::{Navigation, Navigator};
pub use route::{Route, RouteData, RouteTable};
