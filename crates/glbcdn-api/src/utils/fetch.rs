//! Fetching upload payloads from caller-supplied URLs.

use bytes::Bytes;
use glbcdn_core::AppError;

use crate::error::HttpAppError;

pub struct FetchedFile {
    pub bytes: Bytes,
    pub url: reqwest::Url,
}

/// Download the payload behind `raw_url`. A malformed URL is the caller's
/// fault (400 invalid input); an unreachable or non-2xx remote is reported
/// as a fetch failure (also 400, matching the existing API surface).
pub async fn fetch_from_url(
    client: &reqwest::Client,
    raw_url: &str,
) -> Result<FetchedFile, HttpAppError> {
    let url = reqwest::Url::parse(raw_url)
        .map_err(|_| HttpAppError(AppError::InvalidInput("Invalid URL provided".to_string())))?;

    let response = client.get(url.clone()).send().await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Upstream fetch failed");
        HttpAppError(AppError::UpstreamFetch(
            "Failed to fetch file from URL".to_string(),
        ))
    })?;

    if !response.status().is_success() {
        tracing::warn!(url = %url, status = %response.status(), "Upstream returned non-success");
        return Err(HttpAppError(AppError::UpstreamFetch(
            "Failed to fetch file from URL".to_string(),
        )));
    }

    let bytes = response.bytes().await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Failed to read upstream body");
        HttpAppError(AppError::UpstreamFetch(
            "Failed to fetch file from URL".to_string(),
        ))
    })?;

    Ok(FetchedFile { bytes, url })
}

/// Last non-empty path segment of a URL, the default upload filename.
pub fn url_basename(url: &reqwest::Url) -> Option<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
