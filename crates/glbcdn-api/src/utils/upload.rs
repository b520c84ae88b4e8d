//! Shared upload helpers: multipart form parsing and response URL building.

use axum::extract::Multipart;
use axum::http::{header, HeaderMap};
use bytes::Bytes;
use glbcdn_core::{AppError, Config};

use crate::error::HttpAppError;

pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// Parsed multipart upload form: the `file` part plus the optional `type`
/// override used by the media endpoint.
#[derive(Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub declared_type: Option<String>,
}

pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, HttpAppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpAppError(AppError::InvalidInput(format!(
            "Malformed multipart body: {}",
            e
        )))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|n| !n.is_empty());
                let bytes = field.bytes().await.map_err(|e| {
                    HttpAppError(AppError::InvalidInput(format!(
                        "Failed to read file part: {}",
                        e
                    )))
                })?;
                if let Some(filename) = filename {
                    form.file = Some(UploadedFile { filename, bytes });
                }
            }
            Some("type") => {
                form.declared_type = field
                    .text()
                    .await
                    .ok()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Base for absolute URLs in upload responses: `PUBLIC_BASE_URL` when
/// configured, else the request `Origin` header, else empty (URLs come out
/// relative).
pub fn base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(url) = &config.public_base_url {
        return url.clone();
    }
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_default()
}
