//! Legacy model upload endpoint (`/api/upload`).
//!
//! Predates the collection-scoped routes and stays for existing clients.
//! URL-sourced uploads take an optional `filename`, force a model extension
//! when the name has none, and overwrite; multipart uploads validate and
//! dedupe like the current model endpoint. Response URLs use the older
//! `/view/` and `/viewer/` shapes.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, HeaderMap},
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
use crate::utils::upload::{base_url, read_upload_form};

#[derive(Debug, Deserialize)]
pub struct LegacyUrlUpload {
    pub url: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LegacyUploadResponse {
    pub success: bool,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub message: String,
    #[serde(rename = "cdnUrl")]
    pub cdn_url: String,
    #[serde(rename = "viewUrl")]
    pub view_url: String,
    #[serde(rename = "viewerUrl")]
    pub viewer_url: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

fn upload_response(
    state: &AppState,
    headers: &HeaderMap,
    filename: String,
    size: Option<u64>,
    message: &str,
) -> LegacyUploadResponse {
    let base = base_url(&state.config, headers);
    LegacyUploadResponse {
        success: true,
        cdn_url: format!("{}/api/models/{}", base, filename),
        view_url: format!("{}/view/{}", base, filename),
        viewer_url: format!("{}/viewer/{}", base, filename),
        file_url: format!("/api/models/{}", filename),
        message: message.to_string(),
        size,
        filename,
    }
}

#[tracing::instrument(skip_all, fields(operation = "upload_legacy"))]
pub async fn upload_legacy(
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
        let Json(body) = Json::<LegacyUrlUpload>::from_request(request, &())
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
    body: LegacyUrlUpload,
) -> Result<Response, HttpAppError> {
    let url = body
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| HttpAppError(AppError::InvalidInput("URL is required".to_string())))?;

    let fetched = fetch_from_url(&state.http_client, &url).await?;

    let mut name = body
        .filename
        .filter(|n| !n.is_empty())
        .or_else(|| url_basename(&fetched.url))
        .unwrap_or_default();
    let lower = name.to_lowercase();
    if !lower.ends_with(".glb") && !lower.ends_with(".gltf") {
        name.push_str(".glb");
    }
    let name = sanitize_filename(&name);

    validate_size(fetched.bytes.len() as u64, Collection::Models)?;

    let stored = state
        .store
        .save_overwrite(Collection::Models, &name, &fetched.bytes)
        .await?;

    Ok(Json(upload_response(
        state,
        headers,
        stored.name,
        None,
        "File uploaded successfully from URL",
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

    validate_extension(&file.filename, Collection::Models)?;
    validate_size(file.bytes.len() as u64, Collection::Models)?;

    let name = sanitize_filename(&file.filename);
    let stored = state
        .store
        .save_unique(Collection::Models, &name, &file.bytes)
        .await?;

    let size = Some(stored.size);
    Ok(Json(upload_response(
        state,
        headers,
        stored.name,
        size,
        "File uploaded successfully",
    ))
    .into_response())
}
