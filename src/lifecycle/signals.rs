//! OS signal handling.

/// Resolve once Ctrl+C is received.
///
/// If the handler cannot be installed the error is logged and the future
/// never resolves, leaving shutdown to the broadcast coordinator.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
