//! API-key guard for mutating routes.
//!
//! The key comes from `x-api-key` or `Authorization: Bearer ...`. When no
//! `UPLOAD_API_KEY` is configured the guard is fail-open; that state is
//! logged once at startup, not per request.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
    response::{IntoResponse, Response},
};
use glbcdn_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

use super::secure_compare;

const WWW_AUTHENTICATE_VALUE: &str = "Bearer realm=\"Upload API\"";

/// Extractor that rejects the request with 401 unless the configured API
/// key is presented. A no-op when no key is configured.
pub struct RequireApiKey;

fn presented_key(parts: &Parts) -> Option<&str> {
    if let Some(key) = parts.headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
        return Some(key);
    }
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> Response {
    let mut response = HttpAppError(AppError::Unauthorized(
        "Unauthorized - Invalid or missing API key".to_string(),
    ))
    .into_response();
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
    );
    response
}

impl FromRequestParts<Arc<AppState>> for RequireApiKey {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.upload_api_key.as_deref() else {
            return Ok(RequireApiKey);
        };
        match presented_key(parts) {
            Some(key) if secure_compare(key, expected) => Ok(RequireApiKey),
            _ => Err(unauthorized()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/api/models/upload");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).expect("request").into_parts().0
    }

    #[test]
    fn test_presented_key_prefers_x_api_key() {
        let parts = parts_with(&[("x-api-key", "abc"), ("authorization", "Bearer def")]);
        assert_eq!(presented_key(&parts), Some("abc"));
    }

    #[test]
    fn test_presented_key_falls_back_to_bearer() {
        let parts = parts_with(&[("authorization", "Bearer def")]);
        assert_eq!(presented_key(&parts), Some("def"));
    }

    #[test]
    fn test_presented_key_ignores_non_bearer_authorization() {
        let parts = parts_with(&[("authorization", "Basic Zm9v")]);
        assert_eq!(presented_key(&parts), None);
        let parts = parts_with(&[]);
        assert_eq!(presented_key(&parts), None);
    }
}
