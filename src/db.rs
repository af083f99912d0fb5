//! SQLite connection pool for the campus database.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

use crate::config::Config;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the pool at `[db].path`, creating the file and its directory on
/// first use. Connections run in WAL mode so searches can read while
/// `campus init` writes.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let db_path = &config.db.path;
    ensure_parent_dir(db_path)?;

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    tracing::debug!(
        path = %db_path.display(),
        max_connections = config.db.max_connections,
        "connected to database"
    );
    Ok(pool)
}

fn ensure_parent_dir(db_path: &Path) -> Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_at(path: &Path) -> Config {
        let content = format!(
            "[db]\npath = \"{}\"\nmax_connections = 2\n\n[server]\nbind = \"127.0.0.1:0\"\n",
            path.display()
        );
        toml::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn test_connect_creates_file_and_parent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/campus.db");
        let pool = connect(&config_at(&path)).await.unwrap();

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
        pool.close().await;

        assert!(path.exists());
    }

    #[test]
    fn test_bare_file_name_needs_no_directory() {
        assert!(ensure_parent_dir(Path::new("campus.db")).is_ok());
    }
}
