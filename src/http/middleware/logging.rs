//! Request logging middleware.
//! Logs every routed request once its response is ready.

use std::time::Instant;

use axum::body::Body;
use axum::http::Request;

use crate::http::request::RequestIdExt;
use crate::routing::{from_fn, Handler, Middleware, RequestParamsExt};

pub fn logging() -> Middleware {
    from_fn(|req: Request<Body>, next: Handler| async move {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let request_id = req.request_id().map(ToString::to_string);
        let params = req.path_params().map(|p| p.to_map()).unwrap_or_default();

        let response = next.call(req).await;

        tracing::info!(
            request_id = request_id.as_deref().unwrap_or("-"),
            method = %method,
            path = %path,
            params = ?params,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request handled"
        );
        response
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_passes_response_through() {
        let handler = logging().wrap(Handler::new(|_req: Request<Body>| async {
            (StatusCode::CREATED, "made")
        }));
        let req = Request::builder()
            .method("POST")
            .uri("/things")
            .body(Body::empty())
            .unwrap();

        let response = handler.call(req).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"made");
    }
}
