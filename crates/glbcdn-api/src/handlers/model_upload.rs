//! Model upload: multipart form or URL-sourced JSON body.
//!
//! The two modes differ deliberately in collision handling: multipart
//! uploads get a collision-free name, URL-sourced uploads overwrite.
//! Existing clients re-push models by URL under a fixed name and expect
//! replacement.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use glbcdn_core::models::Collection;
use glbcdn_core::AppError;
use glbcdn_storage::{sanitize_filename, validate_extension, validate_size, ValidationError};
use serde::{Deserialize, Serialize};

use crate::auth::RequireApiKey;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::fetch::{fetch_from_url, url_basename};
use crate::utils::upload::read_upload_form;

#[derive(Debug, Deserialize)]
pub struct ModelUrlUpload {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelUploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
}

#[tracing::instrument(skip_all, fields(operation = "upload_model"))]
pub async fn upload_model(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, HttpAppError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.contains("application/json") {
        let Json(body) = Json::<ModelUrlUpload>::from_request(request, &())
            .await
            .map_err(|e| {
                HttpAppError(AppError::InvalidInput(format!("Invalid JSON body: {}", e)))
            })?;
        upload_from_url(&state, body).await
    } else if content_type.contains("multipart/form-data") {
        let multipart = Multipart::from_request(request, &()).await.map_err(|e| {
            HttpAppError(AppError::InvalidInput(format!(
                "Malformed multipart body: {}",
                e
            )))
        })?;
        upload_multipart(&state, multipart).await
    } else {
        Err(HttpAppError(AppError::InvalidInput(
            "Invalid content type. Use multipart/form-data or application/json".to_string(),
        )))
    }
}

async fn upload_from_url(
    state: &AppState,
    body: ModelUrlUpload,
) -> Result<Response, HttpAppError> {
    let url = body
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| HttpAppError(AppError::InvalidInput("URL is required".to_string())))?;

    let fetched = fetch_from_url(&state.http_client, &url).await?;
    let filename = sanitize_filename(&url_basename(&fetched.url).unwrap_or_default());
    validate_size(fetched.bytes.len() as u64, Collection::Models)?;

    let stored = state
        .store
        .save_overwrite(Collection::Models, &filename, &fetched.bytes)
        .await?;

    Ok(Json(ModelUploadResponse {
        success: true,
        message: format!("Model '{}' uploaded successfully from URL.", stored.name),
        filename: stored.name,
    })
    .into_response())
}

async fn upload_multipart(
    state: &AppState,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let form = read_upload_form(multipart).await?;
    let file = form.file.ok_or(ValidationError::MissingFile)?;

    validate_extension(&file.filename, Collection::Models)?;
    validate_size(file.bytes.len() as u64, Collection::Models)?;

    let name = sanitize_filename(&file.filename);
    let stored = state
        .store
        .save_unique(Collection::Models, &name, &file.bytes)
        .await?;

    Ok(Json(ModelUploadResponse {
        success: true,
        message: format!("Model '{}' uploaded successfully.", stored.name),
        filename: stored.name,
    })
    .into_response())
}
