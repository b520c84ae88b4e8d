//! Application state shared by all handlers.

use glbcdn_core::Config;
use glbcdn_storage::FileStore;

pub struct AppState {
    pub config: Config,
    pub store: FileStore,
    /// Client for URL-sourced uploads. One pooled client for the process.
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, http_client: reqwest::Client) -> Self {
        let store = FileStore::new(config.storage_root.clone());
        Self {
            config,
            store,
            http_client,
        }
    }
}
