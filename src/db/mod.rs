//! Database module for PostgreSQL persistence
//!
//! Holds the durable price cache. The database is optional: when it is
//! unavailable the service runs without caching and every resolution goes to
//! the marketplace or the static tables.

pub mod models;
pub mod repository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "RECON_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "RECON_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "RECON_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "RECON_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "RECON_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "recon";
const DEFAULT_POSTGRES_PASSWORD: &str = "recon";
const DEFAULT_POSTGRES_DB: &str = "recon";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, DbError> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    // Create table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS price_cache (
            cache_key VARCHAR(255) PRIMARY KEY,
            part_name TEXT NOT NULL,
            year INTEGER NOT NULL,
            make TEXT NOT NULL,
            model TEXT NOT NULL,
            source VARCHAR(20) NOT NULL,
            price_low DOUBLE PRECISION NOT NULL,
            price_median DOUBLE PRECISION NOT NULL,
            price_high DOUBLE PRECISION NOT NULL,
            purchase_link TEXT,
            raw_payload JSONB NOT NULL DEFAULT '{}',
            fetched_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            expires_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Index on expiry for housekeeping sweeps
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_price_cache_expires_at ON price_cache(expires_at)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
