//! 管理员认证模块
//!
//! # 功能
//! - 管理员凭据校验（bcrypt）
//! - JWT 签发与验证
//! - 受保护路由的 Bearer Token 中间件
//! - 登录端点

mod handlers;
pub mod jwt;
pub mod middleware;
mod router;
mod service;
pub mod types;

pub use jwt::{Claims, JwtManager};
pub use middleware::jwt_auth_middleware;
pub use router::{AuthState, create_auth_router};
pub use service::AuthService;
