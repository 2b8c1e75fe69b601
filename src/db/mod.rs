//! Database access: pool, embedded migrations and repositories

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::*;

/// Apply the embedded migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("./migrations");
    migrator.run(pool).await?;

    tracing::info!(migrations = migrator.iter().count(), "Migrations applied");
    Ok(())
}
