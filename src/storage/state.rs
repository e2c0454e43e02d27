//! Per-check state persistence.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::storage::models::CheckState;

/// Loads the state for `check_id`, inserting the initial state on first sight.
pub async fn get_or_create_check_state(
    pool: &SqlitePool,
    check_id: &str,
    now: i64,
) -> Result<CheckState, DatabaseError> {
    let existing = sqlx::query_as::<_, CheckState>(
        "SELECT check_id, last_succeeded, last_changed_utc_unix, failure_streak,
                last_notified_failure_streak, last_notified_recovery_utc_unix,
                last_notified_slow_utc_unix, last_notified_cert_utc_unix
         FROM check_state
         WHERE check_id = ?",
    )
    .bind(check_id)
    .fetch_optional(pool)
    .await?;

    if let Some(state) = existing {
        return Ok(state);
    }

    let state = CheckState::initial(check_id, now);
    upsert_check_state(pool, &state).await?;
    Ok(state)
}

/// Inserts or replaces the state row for `state.check_id`.
pub async fn upsert_check_state(pool: &SqlitePool, state: &CheckState) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO check_state (
             check_id, last_succeeded, last_changed_utc_unix, failure_streak,
             last_notified_failure_streak, last_notified_recovery_utc_unix,
             last_notified_slow_utc_unix, last_notified_cert_utc_unix
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(check_id) DO UPDATE SET
             last_succeeded=excluded.last_succeeded,
             last_changed_utc_unix=excluded.last_changed_utc_unix,
             failure_streak=excluded.failure_streak,
             last_notified_failure_streak=excluded.last_notified_failure_streak,
             last_notified_recovery_utc_unix=excluded.last_notified_recovery_utc_unix,
             last_notified_slow_utc_unix=excluded.last_notified_slow_utc_unix,
             last_notified_cert_utc_unix=excluded.last_notified_cert_utc_unix",
    )
    .bind(&state.check_id)
    .bind(state.last_succeeded)
    .bind(state.last_changed_utc_unix)
    .bind(state.failure_streak)
    .bind(state.last_notified_failure_streak)
    .bind(state.last_notified_recovery_utc_unix)
    .bind(state.last_notified_slow_utc_unix)
    .bind(state.last_notified_cert_utc_unix)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_first_sight_defaults_to_succeeded() {
        let pool = create_test_pool().await;
        let state = get_or_create_check_state(&pool, "home", 1_700_000_000)
            .await
            .unwrap();
        assert_eq!(state, CheckState::initial("home", 1_700_000_000));
        assert!(state.last_succeeded);
        assert_eq!(state.failure_streak, 0);
    }

    #[tokio::test]
    async fn test_upsert_round_trip() {
        let pool = create_test_pool().await;
        let mut state = get_or_create_check_state(&pool, "api", 100).await.unwrap();
        state.last_succeeded = false;
        state.failure_streak = 3;
        state.last_notified_failure_streak = 2;
        state.last_notified_slow_utc_unix = 150;
        upsert_check_state(&pool, &state).await.unwrap();

        // A later lookup must not reset the stored state
        let loaded = get_or_create_check_state(&pool, "api", 999).await.unwrap();
        assert_eq!(loaded, state);
    }
}
