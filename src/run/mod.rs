//! One monitoring pass, start to finish.

mod finalize;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};

use crate::check::{execute_check, CheckResult};
use crate::config::{load_and_validate, Config};
use crate::initialization::init_crypto_provider;
use crate::notify::{plan_notifications, resolve_enabled_channels, NotificationDispatcher};
use crate::storage::{
    init_db_pool_with_path, insert_check_result, insert_run_started, run_migrations, RunStarted,
};

pub use finalize::{
    compute_exit_code, overall_status, EXIT_CRITICAL_FAILED, EXIT_ERROR, EXIT_OK,
};

/// Results of a monitoring pass.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Row id of this run in the `runs` table
    pub run_id: i64,
    /// Number of enabled checks evaluated
    pub total: usize,
    /// Checks whose verdict succeeded
    pub succeeded: usize,
    /// Checks whose verdict failed, at any severity
    pub failed: usize,
    /// Alerts planned after cooldowns
    pub notifications_planned: usize,
    /// Process exit code: 0 or 2
    pub exit_code: i32,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs every enabled check once, records the verdicts, sends alerts and
/// closes the run.
///
/// # Errors
///
/// Returns an error if the configuration is missing or invalid (before any
/// check runs), or if the database cannot be opened or written. Check failures
/// are never errors; they are reported through `RunReport::exit_code`.
///
/// # Example
///
/// ```no_run
/// use site_monitor::{run_monitor, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     config_path: PathBuf::from("config.yaml"),
///     ..Default::default()
/// };
/// let report = run_monitor(config).await?;
/// std::process::exit(report.exit_code);
/// # }
/// ```
pub async fn run_monitor(config: Config) -> Result<RunReport> {
    let start_time = Instant::now();
    init_crypto_provider();

    let app_config = load_and_validate(&config.config_path)
        .with_context(|| format!("Invalid configuration in {}", config.config_path.display()))?;

    let configured = app_config
        .notifications
        .as_ref()
        .map(|n| n.enabled_channels.as_slice())
        .unwrap_or_default();
    let enabled = resolve_enabled_channels(config.enable_email, config.enable_sms, configured);

    let pool = init_db_pool_with_path(Path::new(&app_config.sqlite.db_path))
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let host = host_name();
    let run_id = insert_run_started(
        &pool,
        &RunStarted {
            started_utc_unix: Utc::now().timestamp(),
            host: &host,
            app_version: env!("CARGO_PKG_VERSION"),
            app_name: &app_config.app.name,
            environment: &app_config.app.environment,
        },
    )
    .await
    .context("Failed to insert run metadata")?;

    let checks: Vec<_> = app_config.checks.iter().filter(|c| c.enabled).collect();
    info!(
        "Starting run {run_id}: {} check{} on {host} ({})",
        checks.len(),
        if checks.len() == 1 { "" } else { "s" },
        app_config.app.environment
    );

    let mut results = Vec::with_capacity(checks.len());
    for check in checks {
        let result = execute_check(check).await;
        insert_check_result(&pool, run_id, &result, Utc::now().timestamp())
            .await
            .with_context(|| format!("Failed to record result for check {}", check.id))?;
        log_result(&result);
        results.push(result);
    }

    let planned = plan_notifications(&pool, &app_config, &results, &enabled, Utc::now().timestamp())
        .await
        .context("Failed to plan notifications")?;

    if !planned.is_empty() {
        let dispatcher = NotificationDispatcher::new(&enabled, app_config.notifications.as_ref())
            .context("Failed to initialize notification channels")?;
        let summary = dispatcher
            .dispatch(&pool, &planned)
            .await
            .context("Failed to record notification attempts")?;
        info!(
            "Notifications: {} planned, {} delivered, {} failed",
            planned.len(),
            summary.delivered,
            summary.failed
        );
    }

    let exit_code = finalize::finish_run(&pool, run_id, &results).await?;
    pool.close().await;

    let succeeded = results.iter().filter(|r| r.success).count();
    Ok(RunReport {
        run_id,
        total: results.len(),
        succeeded,
        failed: results.len() - succeeded,
        notifications_planned: planned.len(),
        exit_code,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    })
}

fn log_result(result: &CheckResult) {
    let status = result
        .status_code
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let latency = result.latency_ms.unwrap_or_default();

    if result.success {
        let note = if result.warning_only { " (slow)" } else { "" };
        info!(
            "Check {} OK{note}: status {status}, {latency}ms, {} redirect(s)",
            result.check_id, result.redirect_count
        );
    } else {
        warn!(
            "Check {} FAILED [{}]: {}",
            result.check_id,
            result.severity,
            result.error.as_deref().unwrap_or_default()
        );
    }
}

/// Machine name recorded on the run row.
fn host_name() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
