#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Fresh migrated SQLite file per test. Keep the `TempDir` alive for the test's duration.
pub async fn get_db() -> Result<(TempDir, DatabaseConnection), anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display()),
        max_connections: 4,
        min_connections: 1,
        ..Default::default()
    };
    let db = models::db::connect_and_migrate(&cfg).await?;
    Ok((dir, db))
}
