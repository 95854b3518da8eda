use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServiceDefaults};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, CafeState, TodoState};

/// Read `config.toml` (or `CONFIG_PATH`) and fill gaps from env and the service defaults.
pub fn load_config(defaults: ServiceDefaults) -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate(defaults).map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Make sure the database file's directory exists, connect, and migrate.
async fn open_store(cfg: &AppConfig) -> Result<DatabaseConnection, StartupError> {
    common::env::ensure_sqlite_dir(&cfg.database.url).await?;
    models::db::connect_and_migrate(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))
}

async fn serve(app: Router, cfg: &AppConfig, name: &'static str) -> Result<(), StartupError> {
    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.bind_addr())))?;
    info!(%addr, service = name, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(name))
        .await
        .map_err(anyhow::Error::from)?;
    info!(service = name, event = "stop", "server drained");
    Ok(())
}

async fn shutdown_signal(name: &'static str) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(service = name, error = %e, "ctrl_c listener failed; running until killed");
        std::future::pending::<()>().await;
    }
    info!(service = name, event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the cafe API and run the HTTP server.
pub async fn run_cafe_api(cfg: AppConfig) -> Result<(), StartupError> {
    let db = open_store(&cfg).await?;
    let app = routes::build_cafe_router(CafeState::new(db), build_cors());
    serve(app, &cfg, "cafe_api").await
}

/// Public entry: build the to-do pages and run the HTTP server.
pub async fn run_todo_app(cfg: AppConfig) -> Result<(), StartupError> {
    let db = open_store(&cfg).await?;
    let app = routes::build_todo_router(TodoState { db });
    serve(app, &cfg, "todo_app").await
}
