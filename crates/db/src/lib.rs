//! PostgreSQL persistence for print requests.
//!
//! Connection settings come from an explicit [`DbConfig`]; nothing in this
//! crate reads process-wide state on its own.

pub mod config;
pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub use config::{DbConfig, DbConfigError, DbTarget};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from explicit configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
}

/// Round-trip a trivial query to confirm the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
