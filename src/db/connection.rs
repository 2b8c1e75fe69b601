//! Database connection management

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::{config::DatabaseConfig, constants::HEALTH_CHECK_TIMEOUT_SECONDS};

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Round-trip a trivial query, giving up after the health check timeout
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    let probe = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool);

    match tokio::time::timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECONDS), probe).await {
        Ok(result) => result.map(|_| ()),
        Err(_) => Err(sqlx::Error::PoolTimedOut),
    }
}
