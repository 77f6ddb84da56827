//! Database initialization
//!
//! The pool is built once by the process entry point and handed to the
//! service layer. Schema creation is idempotent and safe to run on every
//! startup.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Open a connection pool for the given sqlx SQLite URL
///
/// Missing database files are created. In-memory databases are limited to a
/// single connection so that every query sees the same data.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| Error::Config(format!("Invalid database URL '{}': {}", database_url, e)))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_millis(5000));

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new().max_connections(1).min_connections(1)
    } else {
        SqlitePoolOptions::new().max_connections(10)
    };

    debug!("Connecting to database: {}", database_url);
    let pool = pool_options.connect_with(options).await?;

    Ok(pool)
}

/// Connect and make sure the catalog schema exists
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let pool = connect(database_url).await?;
    create_artists_table(&pool).await?;
    info!("Database ready: {}", database_url);
    Ok(pool)
}

/// Create the artists table
///
/// `tags` holds a JSON array of strings. `created_at` is internal bookkeeping
/// and never leaves the database.
pub async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id TEXT PRIMARY KEY,
            creator_name TEXT NOT NULL,
            description TEXT,
            profile_image_url TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            dna_visibility TEXT,
            price REAL,
            license_type TEXT,
            tracks_visibility TEXT,
            become_partner INTEGER NOT NULL DEFAULT 0,
            audio_preview_url TEXT,
            sensitivity INTEGER,
            status TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://catalog?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://catalog.db?mode=rwc"));
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        create_artists_table(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'artists'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_invalid_url_is_config_error() {
        let result = connect("sqlite://catalog.db?mode=sideways").await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
