//! Model collection: list, serve, delete.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use glbcdn_core::models::{Collection, ModelEntry};
use glbcdn_core::AppError;
use glbcdn_storage::StorageError;
use serde::Serialize;

use crate::auth::RequireApiKey;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Served model files never change under the same name; uploads that would
/// collide get a new name instead.
const MODEL_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Debug, Serialize)]
pub struct ModelListResponse {
    pub models: Vec<ModelEntry>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "searchedPaths", skip_serializing_if = "Vec::is_empty")]
    pub searched_paths: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelDeleteResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
}

/// List all models, newest first. Never fails: a missing storage root
/// yields an empty list with an `error` field.
#[tracing::instrument(skip(state), fields(operation = "list_models"))]
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelListResponse> {
    let listing = state.store.list_models().await;
    Json(ModelListResponse {
        count: listing.models.len(),
        models: listing.models,
        error: listing.error,
        searched_paths: listing.searched_paths,
    })
}

/// Serve a model file with its extension-derived content type.
#[tracing::instrument(skip(state), fields(operation = "serve_model"))]
pub async fn serve_model(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let (bytes, content_type) = state.store.read_model(&filename).await.map_err(|e| match e {
        StorageError::NotFound(_) => HttpAppError(AppError::NotFound("Model not found".to_string())),
        other => other.into(),
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static(MODEL_CACHE_CONTROL),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[tracing::instrument(skip(state, _auth), fields(operation = "delete_model"))]
pub async fn delete_model(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<ModelDeleteResponse>, HttpAppError> {
    let deleted = state.store.delete(Collection::Models, &filename).await?;
    Ok(Json(ModelDeleteResponse {
        success: true,
        message: format!("File {} deleted successfully", deleted),
        filename: deleted,
    }))
}
