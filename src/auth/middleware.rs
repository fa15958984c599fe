//! 管理员认证中间件

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use super::jwt::JwtManager;
use crate::common::{auth, types::ErrorResponse};

/// Bearer Token 认证中间件
///
/// 验证通过后将 [`Claims`](super::Claims) 注入请求扩展，供处理器读取当前管理员
pub async fn jwt_auth_middleware(
    State(jwt): State<Arc<JwtManager>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let claims = match auth::extract_bearer_token(&request) {
        Some(token) => jwt.verify_token(token),
        None => {
            let error = ErrorResponse::authentication_error("Missing authorization token");
            return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
        }
    };

    match claims {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!("Token 验证失败: {}", e);
            let error = ErrorResponse::authentication_error("Invalid or expired token");
            (StatusCode::UNAUTHORIZED, Json(error)).into_response()
        }
    }
}
