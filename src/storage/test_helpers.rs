//! Shared test helpers for storage and notification tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::storage::{insert_run_started, run_migrations, RunStarted};

/// In-memory database with migrations applied.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Inserts a run row and returns its id.
pub async fn create_test_run(pool: &SqlitePool, started_utc_unix: i64) -> i64 {
    insert_run_started(
        pool,
        &RunStarted {
            started_utc_unix,
            host: "test-host",
            app_version: "0.0.0-test",
            app_name: "WebsiteMonitor",
            environment: "test",
        },
    )
    .await
    .expect("Failed to insert test run")
}
