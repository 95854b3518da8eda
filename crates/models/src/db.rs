use std::time::Duration;

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Open a pooled connection using the `[database]` section of the app config.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    Database::connect(opt).await
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    info!(url = %cfg.url, "database ready");
    Ok(db)
}

/// Cheap liveness probe used by the health endpoints.
pub async fn ping(db: &DatabaseConnection) -> bool {
    db.execute_unprepared("SELECT 1").await.is_ok()
}
