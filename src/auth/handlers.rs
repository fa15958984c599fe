//! 认证处理器

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};

use super::{
    router::AuthState,
    types::{LoginRequest, LoginResponse},
};
use crate::common::types::ErrorResponse;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(message: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error(message)),
    )
}

/// POST /auth/login
///
/// 校验管理员用户名和密码，返回 JWT Token
pub async fn login(
    State(state): State<AuthState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(payload) =
        body.map_err(|r| (r.status(), Json(ErrorResponse::invalid_request(r.body_text()))))?;
    let service = state.service.clone();
    let username = payload.username.clone();
    let valid = tokio::task::spawn_blocking(move || {
        service.validate_user(&payload.username, &payload.password)
    })
    .await
    .map_err(|e| internal(format!("Failed to verify credentials: {}", e)))?;

    if !valid {
        tracing::warn!("管理员登录失败: username={}", username);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::invalid_credentials()),
        ));
    }

    let response = state
        .service
        .login(&username)
        .map_err(|e| internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!("管理员登录成功: username={}", username);
    Ok(Json(response))
}
