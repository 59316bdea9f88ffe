//! The three navigation guards.
//!
//! Each guard is a plain function of the route's metadata, a synchronous
//! [`SessionView`], and the redirect targets. None of them await, cache, or
//! fail: every path ends in [`GuardDecision::Allow`] or a redirect.

use ledgerly_session::SessionView;
use serde::{Deserialize, Serialize};

use crate::config::RouteConfig;
use crate::route::RouteData;

// ---------------------------------------------------------------------------
// GuardDecision
// ---------------------------------------------------------------------------

/// The outcome of a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The navigation may continue.
    Allow,
    /// The navigation is cancelled and replaced by one to this URL.
    Redirect(String),
}

impl GuardDecision {
    /// `true` for [`GuardDecision::Allow`].
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    fn redirect(target: &str) -> Self {
        Self::Redirect(target.to_string())
    }
}

// ---------------------------------------------------------------------------
// Guard functions
// ---------------------------------------------------------------------------

/// Lets through authenticated users only; everyone else goes to login.
///
/// Asks the session directly on every call, so a token that expired since
/// the last published state is still caught.
pub fn auth_guard(
    _data: &RouteData,
    session: &impl SessionView,
    config: &RouteConfig,
) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        tracing::debug!(target = %config.login, "auth guard: not authenticated");
        GuardDecision::redirect(&config.login)
    }
}

/// Lets through users whose role is listed in the route's declared roles.
///
/// A route that declares no roles (absent or empty list) is closed to
/// everyone, including authenticated admins.
pub fn role_guard(
    data: &RouteData,
    session: &impl SessionView,
    config: &RouteConfig,
) -> GuardDecision {
    let declared = match data.roles.as_deref() {
        Some(roles) if !roles.is_empty() => roles,
        _ => {
            tracing::debug!("role guard: route declares no roles, denying");
            return GuardDecision::redirect(&config.default);
        }
    };

    match session.current_role() {
        Some(role) if declared.contains(&role) => GuardDecision::Allow,
        role => {
            tracing::debug!(?role, ?declared, "role guard: role not permitted");
            GuardDecision::redirect(&config.default)
        }
    }
}

/// Lets through logged-out users only. Logged-in users are sent to the
/// landing page for their role.
pub fn public_guard(
    _data: &RouteData,
    session: &impl SessionView,
    config: &RouteConfig,
) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::Allow;
    }
    let target = config.landing_for(session.current_role());
    tracing::debug!(%target, "public guard: already authenticated");
    GuardDecision::redirect(target)
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

/// Which guard a route is protected by.
///
/// Routes store these instead of function pointers so a route table can be
/// compared, printed, and (de)serialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Guard {
    /// [`auth_guard`]
    Auth,
    /// [`role_guard`]
    Role,
    /// [`public_guard`]
    Public,
}

impl Guard {
    /// Runs this guard.
    pub fn check(
        self,
        data: &RouteData,
        session: &impl SessionView,
        config: &RouteConfig,
    ) -> GuardDecision {
        match self {
            Self::Auth => auth_guard(data, session, config),
            Self::Role => role_guard(data, session, config),
            Self::Public => public_guard(data, session, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerly_token::Role;

    /// Two-field stand-in for a session.
    struct FakeSession {
        authenticated: bool,
        role: Option<Role>,
    }

    impl SessionView for FakeSession {
        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        fn current_role(&self) -> Option<Role> {
            self.role
        }
    }

    fn logged_in(role: Role) -> FakeSession {
        FakeSession {
            authenticated: true,
            role: Some(role),
        }
    }

    fn logged_out() -> FakeSession {
        FakeSession {
            authenticated: false,
            role: None,
        }
    }

    fn roles(roles: &[Role]) -> RouteData {
        RouteData::with_roles(roles.iter().copied())
    }

    // =====================================================================
    // auth_guard
    // =====================================================================

    #[test]
    fn test_auth_guard_authenticated_allows() {
        let decision = auth_guard(
            &RouteData::default(),
            &logged_in(Role::Staff),
            &RouteConfig::default(),
        );
        assert_eq!(decision, GuardDecision::Allow);
    }

    #[test]
    fn test_auth_guard_unauthenticated_redirects_to_login() {
        let decision = auth_guard(
            &RouteData::default(),
            &logged_out(),
            &RouteConfig::default(),
        );
        assert_eq!(decision, GuardDecision::Redirect("/auth/login".into()));
    }

    #[test]
    fn test_auth_guard_uses_configured_login() {
        let config = RouteConfig {
            login: "/signin".into(),
            ..RouteConfig::default()
        };
        let decision = auth_guard(&RouteData::default(), &logged_out(), &config);
        assert_eq!(decision, GuardDecision::Redirect("/signin".into()));
    }

    // =====================================================================
    // role_guard
    // =====================================================================

    #[test]
    fn test_role_guard_listed_role_allows() {
        let data = roles(&[Role::Admin, Role::Owner]);
        let decision = role_guard(&data, &logged_in(Role::Admin), &RouteConfig::default());
        assert_eq!(decision, GuardDecision::Allow);
    }

    #[test]
    fn test_role_guard_unlisted_role_redirects_to_default() {
        let data = roles(&[Role::Admin, Role::Owner]);
        let decision = role_guard(&data, &logged_in(Role::Staff), &RouteConfig::default());
        assert_eq!(decision, GuardDecision::Redirect("/".into()));
    }

    #[test]
    fn test_role_guard_no_role_redirects_to_default() {
        let session = FakeSession {
            authenticated: true,
            role: None,
        };
        let data = roles(&Role::ALL);
        let decision = role_guard(&data, &session, &RouteConfig::default());
        assert_eq!(decision, GuardDecision::Redirect("/".into()));
    }

    #[test]
    fn test_role_guard_absent_roles_always_denies() {
        for role in Role::ALL {
            let decision = role_guard(
                &RouteData::default(),
                &logged_in(role),
                &RouteConfig::default(),
            );
            assert_eq!(decision, GuardDecision::Redirect("/".into()), "{role}");
        }
    }

    #[test]
    fn test_role_guard_empty_roles_always_denies() {
        let data = roles(&[]);
        for role in Role::ALL {
            let decision = role_guard(&data, &logged_in(role), &RouteConfig::default());
            assert!(!decision.is_allow(), "{role}");
        }
    }

    // =====================================================================
    // public_guard
    // =====================================================================

    #[test]
    fn test_public_guard_unauthenticated_allows() {
        let decision = public_guard(
            &RouteData::default(),
            &logged_out(),
            &RouteConfig::default(),
        );
        assert_eq!(decision, GuardDecision::Allow);
    }

    #[test]
    fn test_public_guard_redirects_to_role_landing() {
        let config = RouteConfig::default();
        let cases = [
            (Some(Role::Admin), "/admin"),
            (Some(Role::Owner), "/owner"),
            (Some(Role::Staff), "/dashboard"),
            (None, "/dashboard"),
        ];
        for (role, expected) in cases {
            let session = FakeSession {
                authenticated: true,
                role,
            };
            let decision = public_guard(&RouteData::default(), &session, &config);
            assert_eq!(decision, GuardDecision::Redirect(expected.into()), "{role:?}");
        }
    }

    // =====================================================================
    // Guard
    // =====================================================================

    #[test]
    fn test_guard_check_dispatches() {
        let config = RouteConfig::default();
        let data = roles(&[Role::Owner]);
        let owner = logged_in(Role::Owner);

        assert!(Guard::Auth.check(&data, &owner, &config).is_allow());
        assert!(Guard::Role.check(&data, &owner, &config).is_allow());
        assert_eq!(
            Guard::Public.check(&data, &owner, &config),
            GuardDecision::Redirect("/owner".into())
        );
    }

    #[test]
    fn test_guard_serde_lowercase() {
        let json = serde_json::to_string(&Guard::Public).unwrap();
        assert_eq!(json, "\"public\"");
        let guard: Guard = serde_json::from_str("\"role\"").unwrap();
        assert_eq!(guard, Guard::Role);
    }
}
