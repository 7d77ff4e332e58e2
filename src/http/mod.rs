//! HTTP transport adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum + tower-http layers)
//!     → routing::Router::handle (match, wrap, invoke)
//!     → response.rs (not-found when nothing matched)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::{not_found, NOT_FOUND_BODY};
pub use server::HttpServer;
