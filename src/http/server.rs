//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum app that hands every request to the route tree
//! - Wire up tower-http layers (tracing, request timeout)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::lifecycle::signals;
use crate::routing::Router;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
}

/// HTTP server fronting a [`Router`].
pub struct HttpServer {
    app: axum::Router,
    router: Arc<Router>,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server for a fully built route tree.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let router = Arc::new(router);
        let state = AppState {
            router: Arc::clone(&router),
        };
        let app = Self::build_app(&config, state);
        Self {
            app,
            router,
            config,
        }
    }

    /// Build the axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.router.routes().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                    _ = signals::ctrl_c() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The axum app, for embedding or in-process testing.
    pub fn into_app(self) -> axum::Router {
        self.app
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Hands every request to the route tree.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.router.handle(request).await
}
