//! Path-based HTTP request router with nested route groups.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{
    from_fn, Group, GroupId, Handler, Middleware, PathParams, RequestParamsExt, Router,
    RouterBuilder,
};
