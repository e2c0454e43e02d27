//! Run outcome: exit code, overall status and the final run-row update.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::check::CheckResult;
use crate::config::Severity;
use crate::storage::{update_run_finished, RunFinished};

/// Exit code when every check passed or only non-critical checks failed.
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration or internal errors (set by the binary).
pub const EXIT_ERROR: i32 = 1;
/// Exit code when at least one Critical check failed.
pub const EXIT_CRITICAL_FAILED: i32 = 2;

/// 2 if any failed check is Critical, otherwise 0.
pub fn compute_exit_code(results: &[CheckResult]) -> i32 {
    if results
        .iter()
        .any(|r| !r.success && r.severity == Severity::Critical)
    {
        EXIT_CRITICAL_FAILED
    } else {
        EXIT_OK
    }
}

/// Status recorded on the run row for `exit_code`.
pub fn overall_status(exit_code: i32) -> &'static str {
    if exit_code == EXIT_CRITICAL_FAILED {
        "CRITICAL_FAILED"
    } else {
        "OK"
    }
}

/// Computes the exit code and records the end of the run.
pub(super) async fn finish_run(
    pool: &SqlitePool,
    run_id: i64,
    results: &[CheckResult],
) -> Result<i32> {
    let exit_code = compute_exit_code(results);
    update_run_finished(
        pool,
        run_id,
        &RunFinished {
            finished_utc_unix: Utc::now().timestamp(),
            overall_status: overall_status(exit_code),
            exit_code,
        },
    )
    .await
    .context("Failed to record run completion")?;
    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckConfig;

    fn verdict(severity: Severity, success: bool) -> CheckResult {
        let mut result = CheckResult::new(&CheckConfig {
            id: format!("{severity}"),
            severity,
            ..Default::default()
        });
        result.success = success;
        result
    }

    #[test]
    fn test_critical_failure_exits_two() {
        let results = [
            verdict(Severity::Info, true),
            verdict(Severity::Critical, false),
        ];
        assert_eq!(compute_exit_code(&results), 2);
        assert_eq!(overall_status(2), "CRITICAL_FAILED");
    }

    #[test]
    fn test_non_critical_failures_exit_zero() {
        let results = [
            verdict(Severity::Warning, false),
            verdict(Severity::Info, false),
            verdict(Severity::Critical, true),
        ];
        assert_eq!(compute_exit_code(&results), 0);
        assert_eq!(overall_status(0), "OK");
    }

    #[test]
    fn test_no_checks_exit_zero() {
        assert_eq!(compute_exit_code(&[]), EXIT_OK);
    }
}
