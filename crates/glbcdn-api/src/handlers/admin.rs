//! Admin login and logout.
//!
//! Login fails closed when `ADMIN_PASSWORD` is not configured; that case is
//! a 500 naming the missing variable so the operator can tell it apart from
//! a wrong password.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use glbcdn_core::AppError;
use serde::{Deserialize, Serialize};

use crate::auth::session::{
    clear_session_cookie, create_session_token, is_valid_session, session_cookie,
    token_from_cookie_header,
};
use crate::auth::secure_compare;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
}

#[tracing::instrument(skip_all, fields(operation = "admin_login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, HttpAppError> {
    let Some(password) = body.password.filter(|p| !p.is_empty()) else {
        return Err(HttpAppError(AppError::InvalidInput(
            "Password is required".to_string(),
        )));
    };

    let Some(configured) = state.config.admin_password.as_deref() else {
        tracing::error!("Admin login attempted but ADMIN_PASSWORD is not set");
        let body = ErrorResponse::new(
            "Admin authentication not configured. Set ADMIN_PASSWORD environment variable.",
            "ADMIN_NOT_CONFIGURED",
        );
        return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response());
    };

    if !secure_compare(&password, configured) {
        return Err(HttpAppError(AppError::Unauthorized(
            "Invalid password".to_string(),
        )));
    }

    let token = create_session_token();
    let cookie = session_cookie(&token, state.config.is_production());
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| HttpAppError(AppError::Internal(format!("Invalid cookie value: {}", e))))?;

    tracing::info!("Admin login successful");
    let mut response = Json(SessionResponse {
        success: true,
        message: "Login successful".to_string(),
    })
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
}

/// Reports whether the request carries a live admin session cookie. The
/// edge proxy gating the admin pages checks this before serving them.
#[tracing::instrument(skip_all, fields(operation = "admin_session_status"))]
pub async fn session_status(headers: HeaderMap) -> Json<SessionStatusResponse> {
    let authenticated = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
        .is_some_and(is_valid_session);

    Json(SessionStatusResponse { authenticated })
}

#[tracing::instrument(skip_all, fields(operation = "admin_logout"))]
pub async fn logout() -> Result<Response, HttpAppError> {
    let cookie = HeaderValue::from_str(&clear_session_cookie())
        .map_err(|e| HttpAppError(AppError::Internal(format!("Invalid cookie value: {}", e))))?;

    let mut response = Json(SessionResponse {
        success: true,
        message: "Logged out successfully".to_string(),
    })
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}
