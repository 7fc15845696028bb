use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Creates the SQLite connection pool and applies the schema.
/// The database file is created if it does not exist yet.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Idempotent schema setup.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            resume_text TEXT NOT NULL,
            job_type TEXT NOT NULL,
            ats_score INTEGER,
            suggestions TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create results table")?;

    Ok(())
}

/// Single-connection in-memory database with the schema applied.
/// An in-memory SQLite database lives only as long as its connection, so the
/// pool must never drop or recycle it.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    use std::time::Duration;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
