//! Environment/runtime helpers
//!
//! Sanity checks to ensure the on-disk store location exists at startup.

use std::path::PathBuf;

use tracing::{info, warn};

/// Extract the file path from a `sqlite:` URL. Returns `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the parent directory of a file-backed SQLite database exists.
pub async fn ensure_sqlite_dir(url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(url) else {
        warn!(%url, "database is not file-backed; data will not survive restart");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    info!(path = %path.display(), "using sqlite database file");
    Ok(())
}
