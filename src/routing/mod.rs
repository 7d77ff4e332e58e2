//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Setup (single-threaded, before serving):
//!     RouterBuilder::root()
//!     → group.rs (nested groups, prefixes, middleware)
//!     → pattern.rs (compile each template, fail fast)
//!     → route.rs (append immutable RouteEntry)
//!     → build() → frozen Router
//!
//! Per request:
//!     router.rs (depth-first lookup)
//!     → params.rs (attach PathParams to the request)
//!     → middleware.rs (wrap handler, root outermost)
//!     → handler → Response, or 404 when nothing matched
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (registration order, own routes before children)
//!
//! # Example
//! ```ignore
//! let mut builder = RouterBuilder::new();
//! let mut root = builder.root();
//! root.layer(logging());
//! root.group("/users").get("/:id", |req: Request<Body>| async move {
//!     format!("user {}", req.path_param("id").unwrap_or_default())
//! });
//! let router = builder.build();
//! ```

pub mod error;
pub mod group;
pub mod middleware;
pub mod params;
pub mod pattern;
pub mod route;
pub mod router;

pub use error::{PatternError, RouterError};
pub use group::{Group, GroupId, RouterBuilder};
pub use middleware::{from_fn, Middleware};
pub use params::{path_params, PathParams, RequestParamsExt};
pub use pattern::PathPattern;
pub use route::{Handler, IntoHandler, RouteEntry};
pub use router::{RouteMatch, Router};
