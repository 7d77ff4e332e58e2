//! Response helpers.
//!
//! # Responsibilities
//! - Produce the standard not-found response for unrouted requests
//!
//! # Design Decisions
//! - Plain-text body, no method-not-allowed distinction
//! - Built infallibly from typed parts (no builder `unwrap`)

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Body sent with every not-found response.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// The response written when no route matches.
pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        NOT_FOUND_BODY,
    )
        .into_response()
}
