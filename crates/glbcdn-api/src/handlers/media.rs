//! Media collections: list and delete.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use glbcdn_core::models::{MediaEntry, MediaType};
use glbcdn_core::AppError;
use serde::{Deserialize, Serialize};

use crate::auth::RequireApiKey;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MediaListQuery {
    /// `images` or `videos`; anything else yields an empty list.
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MediaTypeCounts {
    pub images: usize,
    pub videos: usize,
}

#[derive(Debug, Serialize)]
pub struct MediaListResponse {
    pub media: Vec<MediaEntry>,
    pub count: usize,
    pub types: MediaTypeCounts,
}

#[derive(Debug, Serialize)]
pub struct MediaDeleteResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// List media, newest first, optionally filtered by `?type=`.
#[tracing::instrument(skip(state), fields(operation = "list_media"))]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MediaListQuery>,
) -> Json<MediaListResponse> {
    let media = match query.media_type.as_deref() {
        None => state.store.list_media(None).await,
        Some(raw) => match MediaType::from_dir_name(raw) {
            Some(media_type) => state.store.list_media(Some(media_type)).await,
            // An unknown filter matches nothing rather than erroring
            None => Vec::new(),
        },
    };

    let images = media
        .iter()
        .filter(|m| m.media_type == MediaType::Image)
        .count();
    let videos = media.len() - images;

    Json(MediaListResponse {
        count: media.len(),
        media,
        types: MediaTypeCounts { images, videos },
    })
}

#[tracing::instrument(skip(state, _auth), fields(operation = "delete_media"))]
pub async fn delete_media(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    Path((media_type, filename)): Path<(String, String)>,
) -> Result<Json<MediaDeleteResponse>, HttpAppError> {
    let media_type = MediaType::from_dir_name(&media_type).ok_or_else(|| {
        HttpAppError(AppError::InvalidInput(
            "Invalid media type. Must be \"images\" or \"videos\"".to_string(),
        ))
    })?;

    let deleted = state
        .store
        .delete(media_type.collection(), &filename)
        .await?;

    Ok(Json(MediaDeleteResponse {
        success: true,
        message: format!("File {} deleted successfully", deleted),
        filename: deleted,
        media_type: media_type.dir_name().to_string(),
    }))
}
