//! Storefront HTTP server command (`amatta serve`).

use anyhow::Result;

use amatta::config::AmattaConfig;
use amatta::storefront::server::{ServerConfig, build_state, start_server};

pub async fn cmd_serve(config: &AmattaConfig) -> Result<()> {
    let state = build_state(config)?;
    tracing::info!(
        products_url = %config.catalog.products_url,
        metadata_endpoint = %config.metadata.endpoint,
        max_concurrency = config.metadata.max_concurrency,
        "starting storefront"
    );
    start_server(ServerConfig::from(config), state).await
}
