//! Notification audit log and cooldown lookup.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::storage::models::NotificationEventRecord;

/// Records one delivery attempt.
pub async fn insert_notification_event(
    pool: &SqlitePool,
    event: &NotificationEventRecord<'_>,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO notification_events (
             occurred_utc_unix, channel, event_type, check_id, check_name, dedupe_key,
             sent_to, subject, body, success, error
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(event.occurred_utc_unix)
    .bind(event.channel)
    .bind(event.event_type)
    .bind(event.check_id)
    .bind(event.check_name)
    .bind(event.dedupe_key)
    .bind(event.sent_to)
    .bind(event.subject)
    .bind(event.body)
    .bind(event.success)
    .bind(event.error)
    .execute(pool)
    .await?;

    Ok(())
}

/// True when the newest attempt for `dedupe_key` happened at or after
/// `now - cooldown_seconds`. A non-positive cooldown never suppresses.
///
/// Failed attempts count too: a gateway that keeps rejecting is not retried
/// more often than the cooldown allows.
pub async fn was_event_sent_within_cooldown(
    pool: &SqlitePool,
    dedupe_key: &str,
    cooldown_seconds: i64,
    now: i64,
) -> Result<bool, DatabaseError> {
    if cooldown_seconds <= 0 {
        return Ok(false);
    }

    let last: Option<i64> = sqlx::query_scalar(
        "SELECT occurred_utc_unix
         FROM notification_events
         WHERE dedupe_key = ?
         ORDER BY occurred_utc_unix DESC
         LIMIT 1",
    )
    .bind(dedupe_key)
    .fetch_optional(pool)
    .await?;

    Ok(last.is_some_and(|ts| ts >= now - cooldown_seconds))
}
