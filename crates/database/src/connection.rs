//! Database connection management

use anyhow::{Context, Result};
use mochat_config::DatabaseConfig;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tokio::fs;
use tracing::info;

const SQLITE_PRAGMAS: &[(&str, &str)] = &[
    ("foreign_keys", "ON"),
    ("journal_mode", "WAL"),
    ("busy_timeout", "5000"),
];

/// Prepare and establish a database connection
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_path(&config.url).await?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    for (pragma, value) in SQLITE_PRAGMAS {
        sqlx::query(&format!("PRAGMA {pragma} = {value}"))
            .execute(&pool)
            .await
            .with_context(|| format!("failed to set sqlite pragma {pragma}"))?;
    }

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

/// Ensure the SQLite database file and directory exist
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(sqlite_path) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };

    if sqlite_path == ":memory:" {
        return Ok(());
    }

    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    if fs::metadata(path).await.is_err() {
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .await
            .with_context(|| format!("failed to create sqlite database file {}", path.display()))?;
    }

    Ok(())
}

/// Database connection wrapper for easier management
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Create a new database connection from configuration
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let pool = prepare_database(config).await?;
        Ok(Self { pool })
    }

    /// Create a new database connection from an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("failed to test database connection")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_backed_connection_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let config = DatabaseConfig {
            url: db_url,
            max_connections: 1,
        };

        let conn = DatabaseConnection::from_config(&config).await.unwrap();
        conn.test_connection().await.unwrap();
    }

    #[tokio::test]
    async fn in_memory_connection_is_created() {
        let config = DatabaseConfig {
            url: "sqlite://:memory:".to_string(),
            max_connections: 1,
        };

        let conn = DatabaseConnection::from_config(&config).await.unwrap();
        conn.test_connection().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enabled() {
        let config = DatabaseConfig {
            url: "sqlite://:memory:".to_string(),
            max_connections: 1,
        };

        let conn = DatabaseConnection::from_config(&config).await.unwrap();
        let result: (bool,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(conn.pool())
            .await
            .unwrap();

        assert!(result.0);
    }
}
