//! Dispatch behavior through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tree_router::http::NOT_FOUND_BODY;
use tree_router::routing::RouterError;
use tree_router::{from_fn, Handler, PathParams, RequestParamsExt, RouterBuilder};

mod common;
use common::{body_string, recording, recording_handler, request, Trace};

async fn echo_params(req: Request<Body>) -> String {
    let mut pairs: Vec<String> = req
        .path_params()
        .map(|p| p.iter().map(|(k, v)| format!("{k}={v}")).collect())
        .unwrap_or_default();
    pairs.sort();
    pairs.join(",")
}

#[tokio::test]
async fn test_single_param_route() {
    let mut builder = RouterBuilder::new();
    builder.root().get("/users/:id", echo_params);
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/users/42")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "id=42");

    let response = router.handle(request(Method::GET, "/users")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_multi_param_route() {
    let mut builder = RouterBuilder::new();
    builder
        .root()
        .group("/products")
        .get("/:category/:id", |req: Request<Body>| async move {
            let params = req.path_params().cloned().unwrap_or_default();
            let expected: PathParams = [("category", "books"), ("id", "7")].into_iter().collect();
            if params == expected {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        });
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/products/books/7")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_literal_route_is_exact() {
    let mut builder = RouterBuilder::new();
    builder.root().get("/static/files", echo_params);
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/static/files")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");

    for path in ["/static/files/", "/static/files/extra", "/static", "/x/static/files"] {
        let response = router.handle(request(Method::GET, path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {path}");
    }
}

#[tokio::test]
async fn test_literal_route_attaches_empty_params() {
    let mut builder = RouterBuilder::new();
    builder.root().get("/ping", |req: Request<Body>| async move {
        match req.path_params() {
            Some(params) if params.is_empty() => "empty",
            Some(_) => "unexpected",
            None => "absent",
        }
    });
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/ping")).await;
    assert_eq!(body_string(response).await, "empty");
}

#[tokio::test]
async fn test_middleware_order_parent_outermost() {
    let trace = Trace::default();
    let mut builder = RouterBuilder::new();
    let mut root = builder.root();
    let mut parent = root.group("/parent");
    parent.layer(recording(&trace, "M1"));
    parent
        .group("/child")
        .layer(recording(&trace, "M2"))
        .get("/leaf", recording_handler(&trace, "leaf"));
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/parent/child/leaf")).await;
    assert_eq!(body_string(response).await, "leaf");
    assert_eq!(
        trace.events(),
        vec!["M1 pre", "M2 pre", "handler", "M2 post", "M1 post"]
    );
}

#[tokio::test]
async fn test_middleware_order_within_group_and_root() {
    let trace = Trace::default();
    let mut builder = RouterBuilder::new();
    let mut root = builder.root();
    root.layers([recording(&trace, "R1"), recording(&trace, "R2")]);
    root.group("/g")
        .get("/x", recording_handler(&trace, "x"))
        .layer(recording(&trace, "G"));
    let router = builder.build();

    router.handle(request(Method::GET, "/g/x")).await;
    assert_eq!(
        trace.events(),
        vec!["R1 pre", "R2 pre", "G pre", "handler", "G post", "R2 post", "R1 post"]
    );
}

#[tokio::test]
async fn test_sibling_middleware_does_not_leak() {
    let trace = Trace::default();
    let mut builder = RouterBuilder::new();
    let mut root = builder.root();
    root.group("/a").layer(recording(&trace, "A"));
    root.group("/b").get("/x", recording_handler(&trace, "b"));
    root.get("/top", recording_handler(&trace, "top"));
    let router = builder.build();

    router.handle(request(Method::GET, "/b/x")).await;
    router.handle(request(Method::GET, "/top")).await;
    assert_eq!(trace.events(), vec!["handler", "handler"]);
}

#[tokio::test]
async fn test_method_mismatch_is_not_found() {
    let mut builder = RouterBuilder::new();
    builder
        .root()
        .get("/items/:id", echo_params)
        .put("/items/:id", echo_params);
    let router = builder.build();

    for method in [Method::POST, Method::DELETE, Method::from_bytes(b"get").unwrap()] {
        let response = router.handle(request(method.clone(), "/items/1")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "method {method}");
        assert_eq!(body_string(response).await, NOT_FOUND_BODY);
    }

    let response = router.handle(request(Method::PUT, "/items/1")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unregistered_paths_at_any_depth() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = {
        let calls = calls.clone();
        from_fn(move |req, next: Handler| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { next.call(req).await }
        })
    };

    let mut builder = RouterBuilder::new();
    let mut root = builder.root();
    root.layer(counter);
    root.group("/api")
        .group("/v1")
        .group("/deep")
        .get("/:id", echo_params);
    let router = builder.build();

    for path in ["/", "/api", "/api/v1", "/api/v1/deep", "/api/v1/deep/1/2", "/nope/v1/deep/1"] {
        let response = router.handle(request(Method::GET, path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {path}");
        assert_eq!(body_string(response).await, NOT_FOUND_BODY);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let response = router.handle(request(Method::GET, "/api/v1/deep/1")).await;
    assert_eq!(body_string(response).await, "id=1");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_repeated_dispatch_is_stable() {
    let mut builder = RouterBuilder::new();
    let mut root = builder.root();
    root.group("/a").get("/:x", echo_params);
    root.group("/a").get("/:y", echo_params);
    let router = builder.build();

    let first = router.find(&Method::GET, "/a/1").map(|m| (m.group(), m.into_params()));
    for _ in 0..10 {
        let again = router.find(&Method::GET, "/a/1").map(|m| (m.group(), m.into_params()));
        assert_eq!(again, first);
        let response = router.handle(request(Method::GET, "/a/1")).await;
        assert_eq!(body_string(response).await, "x=1");
    }
}

#[tokio::test]
async fn test_concurrent_dispatch() {
    let mut builder = RouterBuilder::new();
    builder.root().get("/n/:n", echo_params);
    let router = Arc::new(builder.build());

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let router = Arc::clone(&router);
            tokio::spawn(async move {
                let response = router.handle(request(Method::GET, &format!("/n/{i}"))).await;
                (i, body_string(response).await)
            })
        })
        .collect();

    for task in tasks {
        let (i, body) = task.await.unwrap();
        assert_eq!(body, format!("n={i}"));
    }
}

#[tokio::test]
async fn test_request_reaches_handler_unchanged() {
    let mut builder = RouterBuilder::new();
    builder
        .root()
        .layer(from_fn(|req, next: Handler| async move { next.call(req).await }))
        .group("/api")
        .post("/echo/:id", |req: Request<Body>| async move {
            format!("{} {}", req.method(), req.uri().path())
        });
    let router = builder.build();

    let response = router.handle(request(Method::POST, "/api/echo/9")).await;
    assert_eq!(body_string(response).await, "POST /api/echo/9");
}

#[tokio::test]
async fn test_encoded_path_is_decoded_before_matching() {
    let mut builder = RouterBuilder::new();
    builder
        .root()
        .get("/users/:name", echo_params)
        .get("/files/my docs", |req: Request<Body>| async move {
            req.uri().path().to_string()
        });
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/users/john%20doe")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "name=john doe");

    let response = router.handle(request(Method::GET, "/users/caf%C3%A9")).await;
    assert_eq!(body_string(response).await, "name=café");

    let response = router.handle(request(Method::GET, "/files/my%20docs")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "/files/my%20docs");
}

#[tokio::test]
async fn test_encoded_slash_splits_segment() {
    let mut builder = RouterBuilder::new();
    builder.root().get("/users/:name", echo_params);
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/users/a%2Fb")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_utf8_matches_raw_path() {
    let mut builder = RouterBuilder::new();
    builder.root().get("/raw/:bytes", echo_params);
    let router = builder.build();

    let response = router.handle(request(Method::GET, "/raw/%FF")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "bytes=%FF");
}

#[test]
fn test_malformed_template_fails_at_registration() {
    let mut builder = RouterBuilder::new();
    let result = builder
        .root()
        .group("/users")
        .try_route(Method::GET, "/:", echo_params)
        .map(|_| ());
    assert!(matches!(result, Err(RouterError::InvalidRoute { .. })));
}
