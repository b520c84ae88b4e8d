//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Transport-level request cap, above the largest per-collection ceiling
/// (500 MB video) with room for multipart framing. Per-collection limits
/// are enforced by the validation gate with their own messages.
const MAX_REQUEST_BODY_BYTES: usize = 512 * 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    // The original surface served every origin; this is a public CDN API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/models", get(handlers::models::list_models))
        .route(
            "/api/models/upload",
            post(handlers::model_upload::upload_model),
        )
        .route(
            "/api/models/{filename}",
            get(handlers::models::serve_model).delete(handlers::models::delete_model),
        )
        .route("/api/media", get(handlers::media::list_media))
        .route(
            "/api/media/upload",
            post(handlers::media_upload::upload_media),
        )
        .route(
            "/api/media/{media_type}/{filename}",
            delete(handlers::media::delete_media),
        )
        .route("/api/upload", post(handlers::legacy_upload::upload_legacy))
        .route("/api/admin/login", post(handlers::admin::login))
        .route("/api/admin/logout", post(handlers::admin::logout))
        .route("/api/admin/session", get(handlers::admin::session_status))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
