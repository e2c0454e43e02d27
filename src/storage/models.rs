//! Row types for the monitor database.

/// Durable per-check state driving the notification state machine.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CheckState {
    pub check_id: String,
    pub last_succeeded: bool,
    pub last_changed_utc_unix: i64,
    pub failure_streak: i64,
    /// Streak level a CheckFailed alert was last planned at; 0 once recovered
    pub last_notified_failure_streak: i64,
    pub last_notified_recovery_utc_unix: i64,
    pub last_notified_slow_utc_unix: i64,
    pub last_notified_cert_utc_unix: i64,
}

impl CheckState {
    /// State for a check seen for the first time: succeeded, no streak, never notified.
    pub fn initial(check_id: &str, now: i64) -> Self {
        Self {
            check_id: check_id.to_string(),
            last_succeeded: true,
            last_changed_utc_unix: now,
            failure_streak: 0,
            last_notified_failure_streak: 0,
            last_notified_recovery_utc_unix: 0,
            last_notified_slow_utc_unix: 0,
            last_notified_cert_utc_unix: 0,
        }
    }
}

/// Run metadata, recorded at start.
pub struct RunStarted<'a> {
    pub started_utc_unix: i64,
    pub host: &'a str,
    pub app_version: &'a str,
    pub app_name: &'a str,
    pub environment: &'a str,
}

/// Run outcome, recorded at end.
pub struct RunFinished<'a> {
    pub finished_utc_unix: i64,
    pub overall_status: &'a str,
    pub exit_code: i32,
}

/// One delivery attempt, successful or not.
pub struct NotificationEventRecord<'a> {
    pub occurred_utc_unix: i64,
    pub channel: &'a str,
    pub event_type: &'a str,
    pub check_id: &'a str,
    pub check_name: &'a str,
    pub dedupe_key: &'a str,
    pub sent_to: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    pub success: bool,
    pub error: Option<&'a str>,
}
