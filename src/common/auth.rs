//! 认证相关的公共工具

use axum::{body::Body, http::Request};
use subtle::ConstantTimeEq;

/// 常量时间字符串比较，防止时序攻击
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// 从 `Authorization: Bearer <token>` 头中提取 token
pub fn extract_bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
