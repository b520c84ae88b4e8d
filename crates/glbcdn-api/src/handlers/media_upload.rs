//! Media upload: multipart form or URL-sourced JSON body.
//!
//! Both modes get collision-free names. A URL-sourced name whose extension
//! is outside the type's whitelist is not rejected; the type's canonical
//! extension is appended instead (the remote path often carries none).

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use glbcdn_core::models::MediaType;
use glbcdn_core::AppError;
use glbcdn_storage::{
    resolve_media_type, sanitize_filename, validate_extension, validate_size, ValidationError,
};
use serde::{Deserialize, Serialize};

use crate::auth::RequireApiKey;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::fetch::{fetch_from_url, url_basename};
use crate::utils::upload::{base_url, read_upload_form};

#[derive(Debug, Deserialize)]
pub struct MediaUrlUpload {
    pub url: Option<String>,
    pub filename: Option<String>,
    #[serde(rename = "type")]
    pub declared_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    pub success: bool,
    pub filename: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub size: u64,
    pub message: String,
    #[serde(rename = "cdnUrl")]
    pub cdn_url: String,
    #[serde(rename = "viewUrl")]
    pub view_url: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

fn upload_response(
    state: &AppState,
    headers: &HeaderMap,
    media_type: MediaType,
    filename: String,
    size: u64,
    from_url: bool,
) -> MediaUploadResponse {
    let base = base_url(&state.config, headers);
    let dir = media_type.dir_name();
    MediaUploadResponse {
        success: true,
        cdn_url: format!("{}/{}/{}", base, dir, filename),
        view_url: format!("{}/media/view/{}", base, filename),
        file_url: format!("/{}/{}", dir, filename),
        message: if from_url {
            format!("{} uploaded successfully from URL", media_type.capitalized())
        } else {
            format!("{} uploaded successfully", media_type.capitalized())
        },
        media_type,
        size,
        filename,
    }
}

#[tracing::instrument(skip_all, fields(operation = "upload_media"))]
pub async fn upload_media(
    _auth: RequireApiKey,
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, HttpAppError> {
    let headers = request.headers().clone();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.contains("application/json") {
        let Json(body) = Json::<MediaUrlUpload>::from_request(request, &())
            .await
            .map_err(|e| {
                HttpAppError(AppError::InvalidInput(format!("Invalid JSON body: {}", e)))
            })?;
        upload_from_url(&state, &headers, body).await
    } else if content_type.contains("multipart/form-data") {
        let multipart = Multipart::from_request(request, &()).await.map_err(|e| {
            HttpAppError(AppError::InvalidInput(format!(
                "Malformed multipart body: {}",
                e
            )))
        })?;
        upload_multipart(&state, &headers, multipart).await
    } else {
        Err(HttpAppError(AppError::InvalidInput(
            "Invalid content type. Use multipart/form-data or application/json".to_string(),
        )))
    }
}

async fn upload_from_url(
    state: &AppState,
    headers: &HeaderMap,
    body: MediaUrlUpload,
) -> Result<Response, HttpAppError> {
    let url = body
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| HttpAppError(AppError::InvalidInput("URL is required".to_string())))?;

    let fetched = fetch_from_url(&state.http_client, &url).await?;

    let raw_name = body
        .filename
        .filter(|n| !n.is_empty())
        .or_else(|| url_basename(&fetched.url))
        .unwrap_or_default();
    let mut name = sanitize_filename(&raw_name);

    let media_type = resolve_media_type(body.declared_type.as_deref(), &name)?;
    if validate_extension(&name, media_type.collection()).is_err() {
        name.push_str(media_type.primary_extension());
    }
    validate_size(fetched.bytes.len() as u64, media_type.collection())?;

    let stored = state
        .store
        .save_unique(media_type.collection(), &name, &fetched.bytes)
        .await?;

    Ok(Json(upload_response(
        state,
        headers,
        media_type,
        stored.name,
        stored.size,
        true,
    ))
    .into_response())
}

async fn upload_multipart(
    state: &AppState,
    headers: &HeaderMap,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let form = read_upload_form(multipart).await?;
    let file = form.file.ok_or(ValidationError::MissingFile)?;

    let media_type = resolve_media_type(form.declared_type.as_deref(), &file.filename)?;
    validate_extension(&file.filename, media_type.collection())?;
    validate_size(file.bytes.len() as u64, media_type.collection())?;

    let name = sanitize_filename(&file.filename);
    let stored = state
        .store
        .save_unique(media_type.collection(), &name, &file.bytes)
        .await?;

    Ok(Json(upload_response(
        state,
        headers,
        media_type,
        stored.name,
        stored.size,
        false,
    ))
    .into_response())
}
