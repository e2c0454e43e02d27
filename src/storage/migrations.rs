//! Database migration management.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
