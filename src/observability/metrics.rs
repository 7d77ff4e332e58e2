//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by method, status, route
//! - `router_request_duration_seconds` (histogram): latency by method, route
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Record one dispatch. `route` is the matched template, or `"none"`.
pub fn record_dispatch(method: &str, status: u16, route: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();

    metrics::counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "router_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(elapsed);
}

/// Install the Prometheus exporter with an HTTP scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_recorder_is_noop() {
        record_dispatch("GET", 200, "/users/:id", Instant::now());
        record_dispatch("GET", 404, "none", Instant::now());
    }
}
