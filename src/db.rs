//! SQLite pool construction and schema setup.

use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{path::Path, str::FromStr};

const INIT_SQL: &str = include_str!("../migrations/0001_init.sql");

/// Open a pool for `database_url`, creating the file (and its directory) on first use.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!("Connecting using raw URL => {}", database_url);

    let db_path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .trim_start_matches("file:");
    let is_memory = db_path.starts_with(":memory:");

    if !is_memory {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating database directory {:?}", parent))?;
                tracing::info!("Created missing directory {:?}", parent);
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parsing database URL `{}`", database_url))?
        .create_if_missing(true);

    // Each in-memory connection is a separate database, so keep exactly one alive.
    let pool_options = if is_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("connecting to {}", database_url))
}

/// Single-connection pool over a throwaway in-memory database.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    connect("sqlite::memory:").await
}

/// Apply the embedded schema. Safe to run repeatedly.
pub async fn run_migrations(db: &SqlitePool) -> Result<()> {
    let statements = INIT_SQL
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    tracing::info!("Running {} migration statements...", statements.len());

    for stmt in statements {
        tracing::debug!("Executing migration SQL: {}", stmt);
        sqlx::query(stmt)
            .execute(db)
            .await
            .with_context(|| format!("executing migration statement `{}`", stmt))?;
    }

    Ok(())
}
