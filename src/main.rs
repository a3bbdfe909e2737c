use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod shared;
mod domain;
mod ports;
mod infrastructure;
mod services;
mod presentation;

use shared::config::{Config, LogFormat, LoggingConfig};
use shared::error::BranchxError;
use shared::result::Result;
use infrastructure::sqlite::branch_repo::SqliteBranchRepository;
use presentation::routes::AppContext;
use services::branch::BranchService;


#[derive(Parser, Debug)]
#[clap(name = "Branchx")]
#[clap(version)]
#[clap(about = "Branch location registry over HTTP")]
pub struct Args {
    /// Configuration file (TOML); defaults are used when it does not exist
    #[clap(short, long, value_parser, default_value = "config.toml")]
    config: PathBuf,

    /// The SQLite database path, overrides database.sqlite_path
    #[clap(short, long, value_parser)]
    db_path: Option<PathBuf>,

    /// Server bind address, overrides server.bind_address
    #[clap(short, long)]
    bind_address: Option<SocketAddr>,
}

fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG 优先于配置文件
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>().map_err(|e| BranchxError::Config(e.to_string())))
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let config = Config::from_args_and_file(&args.config, args.db_path, args.bind_address)?;

    // 初始化日志
    init_tracing(&config.logging);

    info!("Starting Branchx server...");
    info!("Configuration loaded: {:?}", config);

    // 初始化 SQLite 数据库
    let sqlite_pool = infrastructure::sqlite::create_pool(
        &config.database.sqlite_path,
        config.database.max_connections,
    )
    .await?;

    // 运行数据库迁移
    info!("Running database migrations...");
    infrastructure::sqlite::run_migrations(&sqlite_pool).await?;
    info!("Database migrations completed");

    // 仓储 -> 服务 -> 路由
    let branch_store = Arc::new(SqliteBranchRepository::new(sqlite_pool.clone()));
    let branch_service = Arc::new(BranchService::new(branch_store));
    let app_context = Arc::new(AppContext { branch_service });

    let app = presentation::routes::create_app_router(app_context)
        .layer(cors_layer(&config.server.cors_origins)?);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;

    info!("Server listening on {}", config.server.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BranchxError::Internal(e.to_string()))?;

    sqlite_pool.close().await;
    info!("Server stopped");
    Ok(())
}
