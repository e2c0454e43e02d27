//! SQLite persistence.
//!
//! Four tables (see `migrations/`):
//! - `runs`: one row per invocation
//! - `check_results`: one verdict per check per run
//! - `check_state`: durable per-check state for the notification state machine
//! - `notification_events`: every delivery attempt, used for cooldown lookups
//!
//! All operations are free functions over a `SqlitePool` returning `DatabaseError`.

mod events;
mod migrations;
mod models;
mod pool;
mod runs;
mod state;

#[cfg(test)]
pub mod test_helpers;

pub use events::{insert_notification_event, was_event_sent_within_cooldown};
pub use migrations::run_migrations;
pub use models::{CheckState, NotificationEventRecord, RunFinished, RunStarted};
pub use pool::init_db_pool_with_path;
pub use runs::{insert_check_result, insert_run_started, update_run_finished};
pub use state::{get_or_create_check_state, upsert_check_state};
