//! Database connection pool management.
//!
//! This module initializes the SQLite connection pool:
//! - Automatic database file (and parent directory) creation
//! - WAL mode enabled so history queries never block a run

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, error};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Opens (creating if needed) the database at `db_path`.
///
/// # Errors
///
/// Returns `DatabaseError::FileCreationError` if the file cannot be created and
/// `DatabaseError::SqlError` if the connection or pragma fails.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<SqlitePool, DatabaseError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            error!("Failed to create database directory {}: {e}", parent.display());
            DatabaseError::FileCreationError(e.to_string())
        })?;
    }

    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(db_path)
    {
        Ok(_) => debug!("Database file created: {}", db_path.display()),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Database file already exists: {}", db_path.display())
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path.to_string_lossy()))
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(pool)
}
