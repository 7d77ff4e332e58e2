//! Middleware values.
//!
//! A middleware turns the next handler into a wrapping handler. The router
//! never inspects it; any state lives in the closure the caller supplies.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;

use crate::routing::route::Handler;

type WrapFn = dyn Fn(Handler) -> Handler + Send + Sync;

/// A handler-to-handler transformation.
#[derive(Clone)]
pub struct Middleware(Arc<WrapFn>);

impl Middleware {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap `next`, producing the handler that runs this middleware first.
    pub fn wrap(&self, next: Handler) -> Handler {
        (self.0)(next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}

/// Build a middleware from an async function taking the request and the
/// next handler.
///
/// ```ignore
/// let mw = from_fn(|req, next: Handler| async move {
///     tracing::info!("before");
///     let res = next.call(req).await;
///     tracing::info!("after");
///     res
/// });
/// ```
pub fn from_fn<F, Fut, R>(f: F) -> Middleware
where
    F: Fn(Request<Body>, Handler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    let f = Arc::new(f);
    Middleware::new(move |next: Handler| {
        let f = Arc::clone(&f);
        Handler::new(move |req| f(req, next.clone()))
    })
}
