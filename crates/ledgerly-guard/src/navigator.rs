//! Resolving a URL against the route table.
//!
//! A navigation runs in rounds. Each round:
//!
//! 1. Matches the URL against the [`RouteTable`], depth-first and in
//!    declaration order, backtracking out of subtrees that don't match.
//! 2. If the match ends on a redirect route, starts a new round at the
//!    redirect target. Guards don't run for redirect routes.
//! 3. Otherwise runs the guards of every route on the matched chain,
//!    parent-first. The first guard that redirects starts a new round at
//!    its target.
//! 4. If every guard allows, the navigation activates.
//!
//! Rounds are capped by [`RouteConfig::max_redirects`].

use std::collections::BTreeMap;

use ledgerly_session::SessionView;

use crate::config::RouteConfig;
use crate::error::NavigationError;
use crate::guard::GuardDecision;
use crate::route::{Route, RouteTable};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// A navigation that activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Normalised path of the route that activated, e.g. `/owner/staff`.
    pub path: String,
    /// Page rendered by the activated route.
    pub page: String,
    /// Title of the activated route, if it declares one.
    pub title: Option<String>,
    /// Values captured by `:name` segments along the chain.
    pub params: BTreeMap<String, String>,
    /// Every URL redirected to on the way, in order. Empty when the
    /// requested URL activated directly.
    pub redirects: Vec<String>,
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Resolves URLs against a route table, running guards along the way.
///
/// Holds no session state of its own; the session is passed to every
/// [`navigate`](Self::navigate) call, so the guards always see the
/// credential as it is at that moment.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
    config: RouteConfig,
}

impl Navigator {
    /// A navigator over `table`, redirecting per `config`.
    pub fn new(table: RouteTable, config: RouteConfig) -> Self {
        Self { table, config }
    }

    /// The route table navigations resolve against.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Redirect targets and the redirect cap.
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Navigates to `url`, following redirects until a route activates.
    ///
    /// Query strings and fragments are ignored.
    ///
    /// # Errors
    ///
    /// - [`NavigationError::NotFound`] if some URL on the way matches no
    ///   route.
    /// - [`NavigationError::RedirectLoop`] if more than
    ///   [`RouteConfig::max_redirects`] redirects are needed.
    pub fn navigate(
        &self,
        url: &str,
        session: &impl SessionView,
    ) -> Result<Navigation, NavigationError> {
        let mut current = normalize(url);
        let mut redirects = Vec::new();

        loop {
            let segments = split(&current);
            let next = match resolve(self.table.routes(), &segments) {
                None => return Err(NavigationError::NotFound(current)),
                Some(Outcome::Redirect(target)) => target,
                Some(Outcome::Activate { chain, params }) => {
                    match self.run_guards(&chain, session) {
                        GuardDecision::Allow => {
                            let leaf = chain.last().copied();
                            tracing::debug!(path = %current, hops = redirects.len(), "navigation activated");
                            return Ok(Navigation {
                                path: current,
                                page: leaf.and_then(|r| r.page.clone()).unwrap_or_default(),
                                title: leaf.and_then(|r| r.data.title.clone()),
                                params: params.into_iter().collect(),
                                redirects,
                            });
                        }
                        GuardDecision::Redirect(target) => normalize(&target),
                    }
                }
            };

            if redirects.len() >= self.config.max_redirects {
                tracing::warn!(url, hops = redirects.len(), "redirect limit reached");
                return Err(NavigationError::RedirectLoop {
                    url: url.to_string(),
                    hops: redirects.len(),
                });
            }
            tracing::debug!(from = %current, to = %next, "redirecting");
            redirects.push(next.clone());
            current = next;
        }
    }

    fn run_guards(&self, chain: &[&Route], session: &impl SessionView) -> GuardDecision {
        for route in chain {
            for guard in &route.guards {
                let decision = guard.check(&route.data, session, &self.config);
                if !decision.is_allow() {
                    return decision;
                }
            }
        }
        GuardDecision::Allow
    }
}

impl Default for Navigator {
    /// The Ledgerly route table with default redirect targets.
    fn default() -> Self {
        Self::new(RouteTable::ledgerly(), RouteConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

enum Outcome<'a> {
    Activate {
        chain: Vec<&'a Route>,
        params: Vec<(String, String)>,
    },
    /// Already resolved to an absolute, normalised URL.
    Redirect(String),
}

fn resolve<'a>(routes: &'a [Route], segments: &[&str]) -> Option<Outcome<'a>> {
    let mut chain = Vec::new();
    let mut params = Vec::new();
    match_level(routes, segments, &[], &mut chain, &mut params)
}

/// Tries `routes` in order against `segments`. `base` holds the segments
/// consumed by the parents, for resolving relative redirects.
fn match_level<'a>(
    routes: &'a [Route],
    segments: &[&str],
    base: &[&str],
    chain: &mut Vec<&'a Route>,
    params: &mut Vec<(String, String)>,
) -> Option<Outcome<'a>> {
    for route in routes {
        if route.is_catch_all() {
            if let Some(target) = &route.redirect_to {
                return Some(Outcome::Redirect(join(base, target)));
            }
            chain.push(route);
            return Some(Outcome::Activate {
                chain: chain.clone(),
                params: params.clone(),
            });
        }

        let mark = params.len();
        let Some(consumed) = match_prefix(route, segments, params) else {
            continue;
        };
        let rest = &segments[consumed..];

        if let Some(target) = &route.redirect_to {
            if rest.is_empty() {
                return Some(Outcome::Redirect(join(base, target)));
            }
        } else if !route.children.is_empty() {
            let child_base: Vec<&str> = base
                .iter()
                .chain(&segments[..consumed])
                .copied()
                .collect();
            chain.push(route);
            if let Some(outcome) = match_level(&route.children, rest, &child_base, chain, params) {
                return Some(outcome);
            }
            chain.pop();
        } else if rest.is_empty() && route.page.is_some() {
            chain.push(route);
            return Some(Outcome::Activate {
                chain: chain.clone(),
                params: params.clone(),
            });
        }

        params.truncate(mark);
    }
    None
}

/// Matches the route's own segments against the front of `segments`,
/// capturing `:name` parameters. Returns how many segments were consumed.
fn match_prefix(
    route: &Route,
    segments: &[&str],
    params: &mut Vec<(String, String)>,
) -> Option<usize> {
    let mark = params.len();
    let mut consumed = 0;
    for pattern in route.segments() {
        let Some(actual) = segments.get(consumed) else {
            params.truncate(mark);
            return None;
        };
        if let Some(name) = pattern.strip_prefix(':') {
            params.push((name.to_string(), (*actual).to_string()));
        } else if pattern != *actual {
            params.truncate(mark);
            return None;
        }
        consumed += 1;
    }
    Some(consumed)
}

// ---------------------------------------------------------------------------
// URL helpers
// ---------------------------------------------------------------------------

/// Drops query and fragment, collapses empty segments, adds a leading `/`.
fn normalize(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    format!("/{}", split(path).join("/"))
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolves a redirect target against the parent's segments.
fn join(base: &[&str], target: &str) -> String {
    if target.starts_with('/') {
        return normalize(target);
    }
    let mut segments: Vec<&str> = base.to_vec();
    segments.extend(split(target));
    format!("/{}", segments.join("/"))
}
