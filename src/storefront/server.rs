use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::AmattaConfig;

use super::Storefront;
use super::api::{self, AppState};
use super::metadata::MicrolinkClient;

/// Configuration for the storefront server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            dev_mode: false,
        }
    }
}

impl From<&AmattaConfig> for ServerConfig {
    fn from(config: &AmattaConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            dev_mode: config.server.dev,
        }
    }
}

/// Build shared state from configuration: one storefront session whose
/// metadata source is the same microlink client the proxy endpoints use.
pub fn build_state(config: &AmattaConfig) -> Result<Arc<AppState>> {
    let unfurler = MicrolinkClient::new(&config.metadata.endpoint, config.metadata.timeout())
        .context("Failed to build metadata client")?;
    let storefront = Storefront::with_metadata(config, Arc::new(unfurler.clone()))?;
    Ok(Arc::new(AppState {
        storefront,
        unfurler,
    }))
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>, dev_mode: bool) -> Router {
    let app = api::api_router().with_state(state);
    if dev_mode {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Start the storefront server and run until Ctrl+C.
pub async fn start_server(config: ServerConfig, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state, config.dev_mode);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, dev = config.dev_mode, "storefront server listening");
    println!("Amatta storefront running at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
