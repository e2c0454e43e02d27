//! Run history and per-check verdict persistence.

use sqlx::SqlitePool;

use crate::check::CheckResult;
use crate::error_handling::DatabaseError;
use crate::storage::models::{RunFinished, RunStarted};

/// Inserts a run row and returns its id.
pub async fn insert_run_started(
    pool: &SqlitePool,
    run: &RunStarted<'_>,
) -> Result<i64, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO runs (started_utc_unix, host, app_version, app_name, environment)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(run.started_utc_unix)
    .bind(run.host)
    .bind(run.app_version)
    .bind(run.app_name)
    .bind(run.environment)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Records the end of a run.
pub async fn update_run_finished(
    pool: &SqlitePool,
    run_id: i64,
    finished: &RunFinished<'_>,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "UPDATE runs
         SET finished_utc_unix = ?, overall_status = ?, exit_code = ?
         WHERE id = ?",
    )
    .bind(finished.finished_utc_unix)
    .bind(finished.overall_status)
    .bind(finished.exit_code)
    .bind(run_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Appends a verdict to the run's history.
pub async fn insert_check_result(
    pool: &SqlitePool,
    run_id: i64,
    result: &CheckResult,
    evaluated_utc_unix: i64,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO check_results (
             run_id, evaluated_utc_unix, check_id, check_name, url, method, severity,
             succeeded, warning_only, status_code, latency_ms, redirect_count,
             response_bytes, cert_days_remaining, slow_triggered, cert_expiring_triggered, error
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(run_id)
    .bind(evaluated_utc_unix)
    .bind(&result.check_id)
    .bind(&result.check_name)
    .bind(&result.url)
    .bind(result.method.to_string())
    .bind(result.severity.to_string())
    .bind(result.success)
    .bind(result.warning_only)
    .bind(result.status_code.map(i64::from))
    .bind(result.latency_ms.map(|v| v as i64))
    .bind(i64::from(result.redirect_count))
    .bind(result.response_bytes.map(|v| v as i64))
    .bind(result.cert_days_remaining)
    .bind(result.slow_triggered)
    .bind(result.cert_expiring_triggered)
    .bind(result.error.as_deref())
    .execute(pool)
    .await?;

    Ok(())
}
