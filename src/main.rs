mod app;
mod auth;
mod common;
mod model;
mod questions;

use clap::Parser;

use model::config::Config;

/// 判断题投票服务
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// .env 文件路径
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// 监听地址（覆盖 HOST）
    #[arg(long)]
    host: Option<String>,

    /// 监听端口（覆盖 PORT）
    #[arg(long)]
    port: Option<u16>,

    /// SQLite 数据库路径（覆盖 DATABASE_PATH）
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match dotenvy::from_filename(&args.env_file) {
        Ok(path) => tracing::info!("已加载环境文件: {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("未找到环境文件: {}", args.env_file),
        Err(e) => {
            tracing::error!("读取环境文件失败: {}", e);
            std::process::exit(1);
        }
    }

    let mut config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("加载配置失败: {:#}", e);
        std::process::exit(1);
    });
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database_path = database;
    }

    let app = app::build_app(&config).unwrap_or_else(|e| {
        tracing::error!("初始化服务失败: {:#}", e);
        std::process::exit(1);
    });

    let addr = config.bind_addr();
    tracing::info!("启动服务: http://{}", addr);
    tracing::info!("数据库: {}", config.database_path);
    tracing::info!("管理员: {}", config.admin_username);
    tracing::info!("可用 API:");
    tracing::info!("  POST /auth/login");
    tracing::info!("  GET  /questions[?page=N]");
    tracing::info!("  GET  /questions/{{id}}");
    tracing::info!("  POST /questions/vote-vrai/{{id}}");
    tracing::info!("  POST /questions/vote-faux/{{id}}");
    tracing::info!("  POST|PUT|DELETE /questions (需认证)");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("绑定地址 {} 失败: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("服务异常退出: {}", e);
        std::process::exit(1);
    }
}
