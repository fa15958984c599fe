//! JWT Token 管理模块
//!
//! 提供 JWT Token 的生成和验证功能

use std::collections::HashSet;

use anyhow::{Result, anyhow};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// JWT Claims 结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 管理员用户名
    pub username: String,
    /// 签发时间 (Unix timestamp)
    pub iat: usize,
    /// 过期时间 (Unix timestamp)，未配置有效期时不携带
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// 从任意字符串派生 HMAC 密钥
///
/// 使用 SHA256 哈希作为 JWT 签名密钥
fn derive_secret_key(seed: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.finalize().to_vec()
}

/// JWT 管理器
///
/// 启动时构造一次，之后只读共享
pub struct JwtManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_secs: Option<u64>,
}

impl JwtManager {
    /// 创建 JWT 管理器
    ///
    /// # Arguments
    /// * `secret_seed` - 密钥种子（JWT_SECRET 或管理员密码），经 SHA256 派生
    /// * `expiry_secs` - Token 有效期，`None` 表示不过期
    pub fn new(secret_seed: &str, expiry_secs: Option<u64>) -> Self {
        let secret = derive_secret_key(secret_seed);
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            expiry_secs,
        }
    }

    /// Token 有效期（秒）
    pub fn expiry_secs(&self) -> Option<u64> {
        self.expiry_secs
    }

    /// 生成携带 username 声明的 JWT Token
    pub fn generate_token(&self, username: &str) -> Result<String> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_secs();

        let claims = Claims {
            username: username.to_string(),
            iat: now as usize,
            exp: self.expiry_secs.map(|secs| (now + secs) as usize),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// 验证 JWT Token
    ///
    /// # Returns
    /// * `Ok(Claims)` - 验证成功，返回 Claims
    /// * `Err(_)` - 验证失败（过期、签名错误等）
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        // exp 可选：存在时仍会校验是否过期
        validation.required_spec_claims = HashSet::new();

        let token_data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
