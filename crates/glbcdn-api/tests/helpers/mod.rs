//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p glbcdn-api --test models_test` or
//! `cargo test -p glbcdn-api`. Each test app gets its own temp storage root.

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use glbcdn_api::setup::routes::setup_routes;
use glbcdn_api::state::AppState;
use glbcdn_core::Config;
use tempfile::TempDir;

/// Test application: server plus the owned storage root.
pub struct TestApp {
    pub server: TestServer,
    pub root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup a test app over a fresh temp storage root. `configure` tweaks the
/// config (API key, admin password, base URL) before the router is built.
pub fn setup_test_app(configure: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = Config {
        storage_root: Some(temp_dir.path().to_path_buf()),
        ..Config::default()
    };
    configure(&mut config);

    let http_client = reqwest::Client::new();
    let state = Arc::new(AppState::new(config, http_client));
    let server = TestServer::new(setup_routes(state)).expect("Failed to start test server");

    TestApp {
        server,
        root: temp_dir.path().to_path_buf(),
        _temp_dir: temp_dir,
    }
}

pub fn setup_default_app() -> TestApp {
    setup_test_app(|_| {})
}

/// Multipart form with a single `file` part.
pub fn file_form(filename: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part("file", Part::bytes(bytes).file_name(filename))
}

/// Spawn a tiny upstream HTTP server for URL-sourced upload tests. Returns
/// its base URL; the payload is served under any `/file/{name}` path.
pub async fn spawn_upstream(payload: &'static [u8]) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream listener");
    let addr = listener.local_addr().expect("upstream addr");

    let app = axum::Router::new().route(
        "/file/{name}",
        axum::routing::get(move || async move { payload }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream serve");
    });

    format!("http://{}", addr)
}
