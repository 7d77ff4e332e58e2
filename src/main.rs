//! tree-router demo server.
//!
//! Builds a small route tree and serves it:
//!
//! ```text
//! GET    /                              → banner
//! GET    /health                        → {"status":"ok"}
//! GET    /api/users                     → user list
//! POST   /api/users                     → create (201)
//! GET    /api/users/:id                 → one user
//! DELETE /api/users/:id                 → delete (204)
//! GET    /api/products/:category/:id    → one product
//! ```
//!
//! `request_id` and `logging` are installed on the root group, so every
//! routed request carries an ID and is logged once.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Json;
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use tree_router::config::{load_config, ServerConfig};
use tree_router::http::middleware::{logging, request_id};
use tree_router::observability::{logging::init_logging, metrics};
use tree_router::{HttpServer, RequestParamsExt, Router, RouterBuilder, Shutdown};

#[derive(Parser)]
#[command(name = "tree-router")]
#[command(about = "Demo server for the tree-router path router", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the route table in dispatch order and exit.
    #[arg(long)]
    print_routes: bool,
}

fn demo_router() -> Router {
    let mut builder = RouterBuilder::new();
    let mut root = builder.root();
    root.layer(request_id()).layer(logging());

    root.get("/", |_req: Request<Body>| async { "tree-router\n" });
    root.get("/health", |_req: Request<Body>| async {
        Json(json!({ "status": "ok" }))
    });

    let mut api = root.group("/api");

    api.group("/users")
        .get("/", |_req: Request<Body>| async {
            Json(json!([{ "id": "1" }, { "id": "2" }]))
        })
        .post("/", |_req: Request<Body>| async { StatusCode::CREATED })
        .get("/:id", |req: Request<Body>| async move {
            let id = req.path_param("id").unwrap_or_default().to_string();
            Json(json!({ "id": id }))
        })
        .delete("/:id", |_req: Request<Body>| async { StatusCode::NO_CONTENT });

    api.group("/products")
        .get("/:category/:id", |req: Request<Body>| async move {
            let params = req.path_params().map(|p| p.to_map()).unwrap_or_default();
            Json(json!(params))
        });

    builder.build()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    let router = demo_router();

    if cli.print_routes {
        for (method, template) in router.routes() {
            println!("{:<8}{}", method.as_str(), template);
        }
        return Ok(());
    }

    init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tree-router starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
