mod config;
mod db;
mod dtos;
mod error;
mod handlers;
mod middleware;
mod models;
mod repository;
mod routes;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use repository::UserRepository;
use routes::create_router;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub env: config::Config,
    pub repository: UserRepository,
}

#[tokio::main]
async fn main() {
    // -- 加载 .env 到环境变量
    dotenv().ok();

    // -- 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // -- 加载配置：文件 -> 环境变量 -> 命令行
    let cli = config::Cli::parse();
    let config = match config::Config::load(&cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    // -- 创建搜索引擎仓储
    let repository = match UserRepository::from_config(config.elasticsearch.clone()) {
        Ok(repository) => {
            if let Some(elasticsearch) = repository.configuration() {
                tracing::info!(
                    address = %elasticsearch.address,
                    index = %elasticsearch.index_name,
                    timeout = ?elasticsearch.timeout(),
                    "search engine client ready"
                );
            }
            repository
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to build the search engine client");
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState {
        env: config,
        repository,
    });
    let address = format!(
        "{}:{}",
        app_state.env.server.host, app_state.env.server.port
    );
    let app = create_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%address, error = %err, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!("Server running on {}", address);
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server stopped");
        std::process::exit(1);
    }
}
