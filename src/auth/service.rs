//! 管理员凭据校验服务

use std::sync::Arc;

use anyhow::Result;

use super::jwt::JwtManager;
use super::types::LoginResponse;
use crate::common::auth;

/// 启动时计算密码哈希所用的 bcrypt cost
pub const PASSWORD_HASH_COST: u32 = 10;

/// 管理员认证服务
///
/// 仅支持单一管理员，密码在启动时哈希一次
pub struct AuthService {
    admin_username: String,
    admin_password_hash: String,
    jwt: Arc<JwtManager>,
}

impl AuthService {
    pub fn new(
        admin_username: impl Into<String>,
        admin_password: &str,
        jwt: Arc<JwtManager>,
    ) -> Result<Self> {
        Self::with_cost(admin_username, admin_password, jwt, PASSWORD_HASH_COST)
    }

    pub fn with_cost(
        admin_username: impl Into<String>,
        admin_password: &str,
        jwt: Arc<JwtManager>,
        cost: u32,
    ) -> Result<Self> {
        let admin_password_hash = bcrypt::hash(admin_password, cost)?;
        Ok(Self {
            admin_username: admin_username.into(),
            admin_password_hash,
            jwt,
        })
    }

    /// 用户名与密码都匹配时返回 true
    ///
    /// bcrypt 校验是 CPU 密集操作，调用方应放到阻塞线程池执行
    pub fn validate_user(&self, username: &str, password: &str) -> bool {
        if !auth::constant_time_eq(username, &self.admin_username) {
            return false;
        }
        bcrypt::verify(password, &self.admin_password_hash).unwrap_or(false)
    }

    /// 为已通过校验的用户签发 Token
    pub fn login(&self, username: &str) -> Result<LoginResponse> {
        let access_token = self.jwt.generate_token(username)?;
        Ok(LoginResponse {
            access_token,
            expires_in: self.jwt.expiry_secs(),
        })
    }
}
