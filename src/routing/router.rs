//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the frozen group tree
//! - Find the first route matching method and path
//! - Wrap the matched handler with its middleware chain and invoke it
//! - Answer unmatched requests with a not-found response
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Depth-first, pre-order search: a group's own routes before its children
//! - First match wins; registration order is dispatch order
//! - Middleware chains resolved once at build time, handlers wrapped per request
//! - Explicit not-found rather than a method-not-allowed distinction

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;

use crate::http::response::not_found;
use crate::observability::metrics;
use crate::routing::group::{GroupId, GroupNode};
use crate::routing::middleware::Middleware;
use crate::routing::params::PathParams;
use crate::routing::pattern::decode_path;
use crate::routing::route::{Handler, RouteEntry};

#[derive(Debug)]
struct CompiledRoute {
    entry: RouteEntry,
    /// Root group's middleware first, owning group's last.
    middleware: Arc<[Middleware]>,
}

impl CompiledRoute {
    /// Apply the chain last-to-first so the root's middleware runs outermost.
    fn wrapped_handler(&self) -> Handler {
        self.middleware
            .iter()
            .rev()
            .fold(self.entry.handler().clone(), |next, mw| mw.wrap(next))
    }
}

#[derive(Debug)]
struct FrozenGroup {
    prefix: String,
    routes: Vec<CompiledRoute>,
    children: Vec<GroupId>,
}

/// Immutable route tree, shared across requests.
#[derive(Debug)]
pub struct Router {
    groups: Vec<FrozenGroup>,
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'r> {
    group: GroupId,
    route: &'r CompiledRoute,
    params: PathParams,
}

impl<'r> RouteMatch<'r> {
    /// Group that owns the matched route.
    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn method(&self) -> &'r Method {
        self.route.entry.method()
    }

    /// Fully-qualified template of the matched route.
    pub fn template(&self) -> &'r str {
        self.route.entry.pattern().template()
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn into_params(self) -> PathParams {
        self.params
    }

    /// Number of middleware wrapped around the handler.
    pub fn middleware_len(&self) -> usize {
        self.route.middleware.len()
    }
}

impl Router {
    pub(crate) fn from_groups(groups: Vec<GroupNode>) -> Self {
        let chains: Vec<Vec<Arc<[Middleware]>>> = groups
            .iter()
            .map(|group| {
                group
                    .routes
                    .iter()
                    .map(|route| {
                        route
                            .ancestry()
                            .iter()
                            .flat_map(|id| groups[id.index()].middleware.iter().cloned())
                            .collect()
                    })
                    .collect()
            })
            .collect();

        let groups: Vec<FrozenGroup> = groups
            .into_iter()
            .zip(chains)
            .map(|(group, chains)| FrozenGroup {
                prefix: group.prefix,
                routes: group
                    .routes
                    .into_iter()
                    .zip(chains)
                    .map(|(entry, middleware)| CompiledRoute { entry, middleware })
                    .collect(),
                children: group.children,
            })
            .collect();

        tracing::debug!(
            groups = groups.len(),
            routes = groups.iter().map(|g| g.routes.len()).sum::<usize>(),
            "Router built"
        );

        Self { groups }
    }

    /// Find the route for `method` and an already-decoded `path`.
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.find_in(GroupId::ROOT, method, path)
    }

    fn find_in(&self, id: GroupId, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let group = &self.groups[id.index()];

        for route in &group.routes {
            if let Some(params) = route.entry.match_request(method, path) {
                return Some(RouteMatch {
                    group: id,
                    route,
                    params,
                });
            }
        }

        group
            .children
            .iter()
            .find_map(|child| self.find_in(*child, method, path))
    }

    /// Dispatch a request.
    ///
    /// The path is percent-decoded before matching, so parameter values are
    /// decoded too. The request's URI itself is left untouched.
    ///
    /// On a match the request's extensions receive a [`PathParams`] and the
    /// wrapped handler runs exactly once. Otherwise a 404 is returned and no
    /// middleware runs.
    pub async fn handle(&self, mut req: Request<Body>) -> Response {
        let start = Instant::now();
        let method = req.method().clone();

        let (route, params) = {
            let path = decode_path(req.uri().path());
            let Some(matched) = self.find(&method, &path) else {
                tracing::debug!(method = %method, path = %path, "No route matched");
                metrics::record_dispatch(method.as_str(), 404, "none", start);
                return not_found();
            };
            (matched.route, matched.params)
        };

        req.extensions_mut().insert(params);

        let response = route.wrapped_handler().call(req).await;

        metrics::record_dispatch(
            method.as_str(),
            response.status().as_u16(),
            route.entry.pattern().template(),
            start,
        );
        response
    }

    /// Registered routes as `(method, template)`, in dispatch order.
    pub fn routes(&self) -> Vec<(&Method, &str)> {
        let mut out = Vec::new();
        self.collect_routes(GroupId::ROOT, &mut out);
        out
    }

    fn collect_routes<'r>(&'r self, id: GroupId, out: &mut Vec<(&'r Method, &'r str)>) {
        let group = &self.groups[id.index()];
        out.extend(
            group
                .routes
                .iter()
                .map(|r| (r.entry.method(), r.entry.pattern().template())),
        );
        for child in &group.children {
            self.collect_routes(*child, out);
        }
    }

    /// Full prefix of a group, if it exists.
    pub fn prefix(&self, id: GroupId) -> Option<&str> {
        self.groups.get(id.index()).map(|g| g.prefix.as_str())
    }
}
