//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a running router,
//! split out so tests can build the same router around a fake video host.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vidrelay_core::{Config, VideoHost};
use vidrelay_youtube::YouTubeClient;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let client = YouTubeClient::from_config(&config).context("Failed to build YouTube client")?;
    tracing::info!(upload_url = %client.upload_url(), "YouTube client ready");

    build_app(config, Arc::new(client))
}

/// Build state and router around any [`VideoHost`].
pub fn build_app(
    config: Config,
    video_host: Arc<dyn VideoHost>,
) -> Result<(Arc<AppState>, axum::Router)> {
    let state = Arc::new(AppState::new(config.clone(), video_host));
    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
