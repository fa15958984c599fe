use anyhow::{Context, bail};

/// 默认 Token 有效期（7 天）
const DEFAULT_TOKEN_EXPIRY_SECONDS: u64 = 7 * 24 * 60 * 60;

/// 应用配置
///
/// 全部来自环境变量（可由 `.env` 文件预先注入），
/// 其中管理员用户名和密码为必填项，缺失时启动失败。
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,

    pub port: u16,

    /// SQLite 数据库路径（支持 `:memory:`）
    pub database_path: String,

    /// 管理员用户名
    pub admin_username: String,

    /// 管理员明文密码（仅在启动时用于计算 bcrypt 哈希）
    pub admin_password: String,

    /// JWT 签名密钥，未配置时由管理员密码派生
    pub jwt_secret: Option<String>,

    /// Token 有效期（秒），`None` 表示签发不带 `exp` 的 Token
    pub token_expiry_secs: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_path() -> String {
    "questions.db".to_string()
}

impl Config {
    /// 从进程环境变量加载配置
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 空字符串与未设置同等对待。
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(admin_password) = get("ADMIN_PASSWORD") else {
            bail!("ADMIN_PASSWORD is missing in the environment");
        };
        let Some(admin_username) = get("ADMIN_USERNAME") else {
            bail!("ADMIN_USERNAME is missing in the environment");
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT 不是合法端口: {}", v))?,
            None => default_port(),
        };

        let token_expiry_secs = match get("JWT_EXPIRES_IN") {
            Some(v) => {
                let secs = v
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("JWT_EXPIRES_IN 不是合法秒数: {}", v))?;
                (secs > 0).then_some(secs)
            }
            None => Some(DEFAULT_TOKEN_EXPIRY_SECONDS),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(default_host),
            port,
            database_path: get("DATABASE_PATH").unwrap_or_else(default_database_path),
            admin_username,
            admin_password,
            jwt_secret: get("JWT_SECRET"),
            token_expiry_secs,
        })
    }

    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
