//! Application setup and initialization
//!
//! All initialization logic lives here, extracted from main.rs for better
//! organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use glbcdn_core::Config;

use crate::state::AppState;

const FETCH_TIMEOUT_SECS: u64 = 60;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config.environment);
    tracing::info!("Configuration loaded and validated successfully");

    // The guard state is logged once here, not per request
    match &config.upload_api_key {
        Some(_) => {
            tracing::info!("Upload API key configured; mutating endpoints require authentication")
        }
        None => tracing::warn!(
            "UPLOAD_API_KEY is not set; mutating endpoints accept unauthenticated requests"
        ),
    }
    if config.admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; admin login is disabled");
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")?;

    let state = Arc::new(AppState::new(config, http_client));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
