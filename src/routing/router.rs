//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the matching route for a request
//! - Return the matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan in specificity order (acceptable for typical route counts)
//! - Explicit `None` rather than silent default

use axum::body::Body;
use axum::http::Request;

use crate::config::RouteConfig;
use crate::routing::matcher::{Matcher, PathPrefixMatcher};

/// A compiled route: the config plus its matcher.
#[derive(Debug)]
pub struct Route {
    /// Route identifier for logging/metrics.
    pub name: String,
    /// Name of the upstream this route forwards to.
    pub upstream: String,
    matcher: PathPrefixMatcher,
}

impl Route {
    /// The path prefix this route matches.
    pub fn path_prefix(&self) -> &str {
        self.matcher.prefix()
    }
}

/// Immutable table of compiled routes, checked in specificity order.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Compile a route table from configuration.
    ///
    /// Routes are sorted by priority (descending), then by prefix length
    /// (descending) so the most specific prefix is checked first.
    pub fn from_config(mut configs: Vec<RouteConfig>) -> Self {
        configs.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.path_prefix.len().cmp(&a.path_prefix.len()))
        });

        let routes = configs
            .into_iter()
            .map(|config| Route {
                matcher: PathPrefixMatcher::new(config.path_prefix),
                name: config.name,
                upstream: config.upstream,
            })
            .collect();

        Self { routes }
    }

    /// Find the first route matching the request, in specificity order.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(req))
    }

    /// Number of compiled routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if no routes are configured.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
