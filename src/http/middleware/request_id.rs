//! Request ID middleware.
//!
//! # Responsibilities
//! - Reuse an incoming `x-request-id` or generate a UUID v4
//! - Expose the ID to inner middleware and handlers
//! - Echo the ID on the response
//!
//! # Design Decisions
//! - Implemented as a router middleware, so it only runs for routed requests

use axum::body::Body;
use axum::http::{HeaderValue, Request};

use crate::http::request::{RequestId, X_REQUEST_ID};
use crate::routing::{from_fn, Handler, Middleware};

/// Middleware that tags each routed request with a [`RequestId`].
pub fn request_id() -> Middleware {
    from_fn(|mut req: Request<Body>, next: Handler| async move {
        let id = RequestId::from_request(&req);
        let header = HeaderValue::from_str(id.as_str()).ok();
        req.extensions_mut().insert(id);

        let mut response = next.call(req).await;
        if let Some(value) = header {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }
        response
    })
}
