//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use tree_router::{from_fn, Handler, Middleware};

/// Ordered record of events emitted by middleware and handlers.
#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Middleware that records `<name> pre` and `<name> post` around the call.
pub fn recording(trace: &Trace, name: &'static str) -> Middleware {
    let trace = trace.clone();
    from_fn(move |req, next: Handler| {
        let trace = trace.clone();
        async move {
            trace.push(format!("{name} pre"));
            let response = next.call(req).await;
            trace.push(format!("{name} post"));
            response
        }
    })
}

/// Handler that records `handler` and answers with `body`.
pub fn recording_handler(
    trace: &Trace,
    body: &'static str,
) -> impl Fn(Request<Body>) -> std::future::Ready<&'static str> + Send + Sync + 'static {
    let trace = trace.clone();
    move |_req| {
        trace.push("handler");
        std::future::ready(body)
    }
}

pub fn request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
