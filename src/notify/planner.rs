//! Notification decision engine.
//!
//! One pass per verdict, against the check's persisted state:
//! - success after failing plans `Recovered`
//! - a failure streak crossing `consecutiveFailures` plans `CheckFailed` once
//! - `SlowResponse` and `CertExpiring` are planned every run their trigger is set
//!
//! Every candidate is cooldown-gated. If any enabled channel delivered the same
//! event for the same check within `cooldownSeconds`, the event is dropped for
//! all channels.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat};
use log::debug;
use sqlx::SqlitePool;

use crate::check::CheckResult;
use crate::config::{AppConfig, ChannelKind, NotificationRules};
use crate::error_handling::DatabaseError;
use crate::notify::models::{dedupe_key, EventType, PlannedNotification};
use crate::storage::{get_or_create_check_state, upsert_check_state, was_event_sent_within_cooldown};

/// Advances every check's state and returns the alerts to deliver.
///
/// State is persisted for every result, whether or not anything was planned.
pub async fn plan_notifications(
    pool: &SqlitePool,
    config: &AppConfig,
    results: &[CheckResult],
    enabled: &[ChannelKind],
    now: i64,
) -> Result<Vec<PlannedNotification>, DatabaseError> {
    let rules = config
        .notifications
        .as_ref()
        .map(|n| n.rules)
        .unwrap_or_default();
    let gate = CooldownGate {
        pool,
        enabled,
        rules,
        now,
    };
    let alerts_configured = config.notifications.is_some();
    let threshold = i64::from(rules.consecutive_failures);

    let mut planned = Vec::new();

    for result in results {
        let mut state = get_or_create_check_state(pool, &result.check_id, now).await?;
        let was_ok = state.last_succeeded;

        if result.success {
            if !was_ok && gate.open(EventType::Recovered, &result.check_id).await? {
                planned.push(build(config, result, EventType::Recovered, now, None));
                state.last_notified_recovery_utc_unix = now;
            }
            state.failure_streak = 0;
            state.last_notified_failure_streak = 0;
        } else {
            state.failure_streak = if was_ok { 1 } else { state.failure_streak + 1 };

            if state.failure_streak >= threshold
                && state.last_notified_failure_streak < threshold
                && gate.open(EventType::CheckFailed, &result.check_id).await?
            {
                let extra = ("FailureStreak", state.failure_streak.to_string());
                planned.push(build(config, result, EventType::CheckFailed, now, Some(extra)));
                state.last_notified_failure_streak = threshold;
            }
        }

        if was_ok != result.success {
            state.last_changed_utc_unix = now;
        }
        state.last_succeeded = result.success;

        if alerts_configured
            && result.slow_triggered
            && gate.open(EventType::SlowResponse, &result.check_id).await?
        {
            let max_latency = config
                .checks
                .iter()
                .find(|c| c.id.eq_ignore_ascii_case(&result.check_id))
                .and_then(|c| c.max_latency_ms)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let extra = ("MaxLatencyMs", max_latency);
            planned.push(build(config, result, EventType::SlowResponse, now, Some(extra)));
            state.last_notified_slow_utc_unix = now;
        }

        if alerts_configured
            && result.cert_expiring_triggered
            && gate.open(EventType::CertExpiring, &result.check_id).await?
        {
            planned.push(build(config, result, EventType::CertExpiring, now, None));
            state.last_notified_cert_utc_unix = now;
        }

        upsert_check_state(pool, &state).await?;
    }

    Ok(planned)
}

struct CooldownGate<'a> {
    pool: &'a SqlitePool,
    enabled: &'a [ChannelKind],
    rules: NotificationRules,
    now: i64,
}

impl CooldownGate<'_> {
    /// False when any enabled channel delivered this event within the cooldown.
    async fn open(&self, event_type: EventType, check_id: &str) -> Result<bool, DatabaseError> {
        for channel in self.enabled {
            let key = dedupe_key(*channel, event_type, check_id);
            if was_event_sent_within_cooldown(self.pool, &key, self.rules.cooldown_seconds, self.now)
                .await?
            {
                debug!("Suppressed {event_type} for {check_id}: {key} is in cooldown");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn build(
    config: &AppConfig,
    result: &CheckResult,
    event_type: EventType,
    now: i64,
    extra: Option<(&str, String)>,
) -> PlannedNotification {
    fn opt<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    let utc_now = DateTime::from_timestamp(now, 0)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default();

    let mut vars: BTreeMap<String, String> = [
        ("UtcNow", utc_now),
        ("AppName", config.app.name.clone()),
        ("Environment", config.app.environment.clone()),
        ("CheckId", result.check_id.clone()),
        ("CheckName", result.check_name.clone()),
        ("Url", result.url.clone()),
        ("StatusCode", opt(result.status_code)),
        ("LatencyMs", opt(result.latency_ms)),
        ("Error", result.error.clone().unwrap_or_default()),
        ("RedirectCount", result.redirect_count.to_string()),
        ("ResponseBytes", opt(result.response_bytes)),
        ("CertDaysRemaining", opt(result.cert_days_remaining)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    if let Some((key, value)) = extra {
        vars.insert(key.to_string(), value);
    }

    PlannedNotification {
        event_type,
        check_id: result.check_id.clone(),
        check_name: result.check_name.clone(),
        vars,
    }
}
