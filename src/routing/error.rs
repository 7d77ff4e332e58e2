//! Setup-time routing errors.
//!
//! Everything here is raised while the route tree is being registered.
//! Dispatch itself never fails: an unmatched request is answered with a
//! not-found response instead of an error value.

use axum::http::Method;
use thiserror::Error;

/// A path template that cannot be compiled into a matcher.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("empty parameter name in template `{template}`")]
    EmptyParamName { template: String },

    #[error("duplicate parameter `{name}` in template `{template}`")]
    DuplicateParam { template: String, name: String },

    #[error("failed to compile matcher: {0}")]
    Regex(#[from] regex::Error),
}

/// Errors returned by the registration API.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("invalid route {method} {template}: {source}")]
    InvalidRoute {
        method: Method,
        template: String,
        #[source]
        source: PatternError,
    },
}
