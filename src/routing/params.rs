//! Per-request path parameters.
//!
//! The dispatcher attaches a [`PathParams`] value to the request extensions
//! before invoking the wrapped handler. Reading it back is a typed, checked
//! lookup: a request that never matched a route simply has no parameters.

use std::collections::HashMap;

use axum::http::Request;

/// Ordered name → value mapping captured from the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, String)>,
}

impl PathParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy the parameters into a `HashMap`.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.iter().cloned().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for PathParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read the parameters attached to a dispatched request.
///
/// Returns `None` when the request did not pass through the router.
pub fn path_params<B>(req: &Request<B>) -> Option<&PathParams> {
    req.extensions().get::<PathParams>()
}

/// Extension trait for reading path parameters from a request.
pub trait RequestParamsExt {
    /// The full parameter map, if the request was routed.
    fn path_params(&self) -> Option<&PathParams>;

    /// A single parameter value.
    fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params().and_then(|params| params.get(name))
    }
}

impl<B> RequestParamsExt for Request<B> {
    fn path_params(&self) -> Option<&PathParams> {
        path_params(self)
    }
}
