//! Route entries and handler values.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::routing::group::GroupId;
use crate::routing::params::PathParams;
use crate::routing::pattern::PathPattern;

type HandlerFn = dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync;

/// A type-erased async request handler.
///
/// Cloning is cheap; all clones share the same function.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    /// Wrap an async function returning anything that converts into a response.
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self(Arc::new(
            move |req: Request<Body>| -> BoxFuture<'static, Response> {
                let fut = f(req);
                Box::pin(async move { fut.await.into_response() })
            },
        ))
    }

    /// Invoke the handler.
    pub fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        (self.0)(req)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").finish_non_exhaustive()
    }
}

/// Conversion of async functions into [`Handler`]s.
pub trait IntoHandler {
    fn into_handler(self) -> Handler;
}

impl<F, Fut, R> IntoHandler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn into_handler(self) -> Handler {
        Handler::new(self)
    }
}

/// One registered route.
///
/// Immutable once appended to its group.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
    /// Groups from the root down to the owning group.
    ancestry: Arc<[GroupId]>,
}

impl RouteEntry {
    pub(crate) fn new(
        method: Method,
        pattern: PathPattern,
        handler: Handler,
        ancestry: Arc<[GroupId]>,
    ) -> Self {
        Self {
            method,
            pattern,
            handler,
            ancestry,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn ancestry(&self) -> &[GroupId] {
        &self.ancestry
    }

    /// Parameters captured from `path` if both method and path match.
    ///
    /// Method compared byte-for-byte; `get` is not `GET`.
    pub fn match_request(&self, method: &Method, path: &str) -> Option<PathParams> {
        if self.method != *method {
            return None;
        }
        self.pattern.match_path(path)
    }
}
