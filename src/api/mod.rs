//! HTTP management surface
//!
//! This module provides the endpoints that drive the monitoring engine and
//! read its state:
//!
//! - `POST /add-endpoint` - register a URL and start monitoring it
//! - `POST /remove-endpoint` - unregister a URL and stop monitoring it
//! - `GET /health` - availability snapshot for all targets
//! - `GET /export-csv` - the same snapshot as a CSV report
//! - `GET /export-pdf` - the same snapshot as a PDF report
//!
//! An optional static directory is served at `/` for a UI; the API itself
//! does not depend on it.

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use state::ApiState;
pub use types::{EndpointRequest, HealthEntry, MessageResponse};

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    Router,
    routing::{get, post},
};
use tracing::info;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (e.g. "0.0.0.0:3000")
    pub bind_addr: SocketAddr,

    /// Enable CORS for external dashboards
    pub enable_cors: bool,

    /// Optional directory with static UI files
    pub static_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            enable_cors: true,
            static_dir: None,
        }
    }
}

/// Build the management router
pub fn build_router(state: ApiState, static_dir: Option<&std::path::Path>) -> Router {
    use tower_http::trace::TraceLayer;

    let mut app = Router::new()
        .route("/add-endpoint", post(routes::endpoints::add_endpoint))
        .route("/remove-endpoint", post(routes::endpoints::remove_endpoint))
        .route("/health", get(routes::health::health_snapshot))
        .route("/export-csv", get(routes::export::export_csv))
        .route("/export-pdf", get(routes::export::export_pdf))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if let Some(dir) = static_dir {
        use tower_http::services::ServeDir;

        if dir.exists() {
            info!("serving static UI from {}", dir.display());
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            info!("static UI directory not found at {}", dir.display());
        }
    }

    app
}

/// Spawn the API server
///
/// This starts an Axum HTTP server in a background task.
/// Returns the server's local address.
pub async fn spawn_api_server(config: ApiConfig, state: ApiState) -> anyhow::Result<SocketAddr> {
    use tower_http::cors::{Any, CorsLayer};

    info!("starting API server on {}", config.bind_addr);

    let mut app = build_router(state, config.static_dir.as_deref());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;

    info!("API server listening on {}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(addr)
}
