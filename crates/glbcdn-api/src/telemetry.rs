//! Basic tracing initialization.
//!
//! Respects `RUST_LOG`; defaults to `info` for the service crates.

use tracing_subscriber::EnvFilter;

pub fn init_telemetry(environment: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,glbcdn_api=info,glbcdn_storage=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    tracing::info!(environment = %environment, "Telemetry initialized");
}
