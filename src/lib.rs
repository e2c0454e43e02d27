//! site_monitor library: one-pass website health monitoring
//!
//! A run loads a JSON/YAML configuration, evaluates every enabled check once
//! (HTTP status, headers, body rules, redirects, latency, login flows and TLS
//! certificate expiry), records verdicts in SQLite, and sends email/SMS alerts
//! on state changes. Scheduling is left to cron.
//!
//! # Example
//!
//! ```no_run
//! use site_monitor::{run_monitor, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     config_path: std::path::PathBuf::from("config.yaml"),
//!     enable_email: true,
//!     ..Default::default()
//! };
//!
//! let report = run_monitor(config).await?;
//! println!("{} of {} checks passed (exit code {})",
//!          report.succeeded, report.total, report.exit_code);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod check;
pub mod config;
mod content;
mod error_handling;
mod fetch;
pub mod initialization;
pub mod notify;
mod run;
mod storage;
mod tls;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ConfigError, DatabaseError, InitializationError};
pub use run::{
    compute_exit_code, overall_status, run_monitor, RunReport, EXIT_CRITICAL_FAILED, EXIT_ERROR,
    EXIT_OK,
};
pub use storage::{init_db_pool_with_path, run_migrations};
