//! Schema migrations
//!
//! Migrations are plain SQL files resolved at runtime, so the binary can be
//! pointed at another directory without recompiling.

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use std::path::{Path, PathBuf};

use super::DbError;

/// Migrations shipped with this crate
pub fn default_migrations_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/migrations"))
}

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), DbError> {
    tracing::info!(dir = %dir.display(), "Running database migrations");

    let migrator = Migrator::new(dir)
        .await
        .map_err(|e| DbError::Migration(e.to_string()))?;

    migrator
        .run(pool)
        .await
        .map_err(|e| DbError::Migration(e.to_string()))?;

    tracing::info!("Database migrations completed");

    Ok(())
}
