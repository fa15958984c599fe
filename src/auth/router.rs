//! 认证路由配置

use std::sync::Arc;

use axum::{Router, routing::post};

use super::{handlers::login, service::AuthService};

/// 认证 API 共享状态
#[derive(Clone)]
pub struct AuthState {
    pub service: Arc<AuthService>,
}

impl AuthState {
    pub fn new(service: AuthService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// 创建认证路由
///
/// # 端点
/// - `POST /login` - 管理员登录，返回 `access_token`
pub fn create_auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/login", post(login))
        .with_state(state)
}
