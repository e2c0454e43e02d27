//! Configuration constants.
//!
//! This module defines defaults and limits used throughout the application,
//! including probe timeouts, size limits and file locations.

/// Default application name recorded in run rows and alert variables.
pub const DEFAULT_APP_NAME: &str = "WebsiteMonitor";

/// Default environment label.
pub const DEFAULT_ENVIRONMENT: &str = "local";

/// Default SQLite database path.
pub const DB_PATH: &str = "./monitor.db";

/// Config file names probed in the working directory when `--config` is absent.
/// The first existing file wins; the first entry is used in the not-found message.
pub const CONFIG_CANDIDATES: &[&str] = &["config.yaml", "config.yml", "config.json"];

/// User-Agent sent with every probe request.
pub const USER_AGENT: &str = concat!("WebsiteMonitor/", env!("CARGO_PKG_VERSION"));

// Per-check defaults
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
/// Allowed timeout range in seconds
pub const MIN_TIMEOUT_SECONDS: u64 = 1;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Default expected status range
pub const DEFAULT_EXPECTED_STATUS_MIN: u16 = 200;
pub const DEFAULT_EXPECTED_STATUS_MAX: u16 = 299;

// Redirect handling
/// Default redirect budget per probe
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

// Response and body size limits
/// Default cap on response body bytes read per probe (1MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;
/// Allowed range for a configured `maxBodyBytes`
pub const MIN_BODY_BYTES_CAP: usize = 1024;
pub const MAX_BODY_BYTES_CAP: usize = 50_000_000;

// Diagnostics
/// Configured values echoed into error text are cut to this many characters
pub const MAX_DIAGNOSTIC_CHARS: usize = 120;
/// Separator between accumulated validation failures
pub const ERROR_SEPARATOR: &str = " | ";

// TLS probe
/// Port used when an https URL has no explicit port
pub const DEFAULT_TLS_PORT: u16 = 443;

// Notifications
/// Default consecutive failures before a CheckFailed alert
pub const DEFAULT_CONSECUTIVE_FAILURES: u32 = 1;
/// Default cooldown between repeated deliveries of one dedupe key
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 600;
/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Default SMS gateway payload wrapper
pub const DEFAULT_SMS_BODY_TEMPLATE: &str = "{ \"message\": \"{{Body}}\" }";
/// Default SMS gateway content type
pub const DEFAULT_SMS_CONTENT_TYPE: &str = "application/json";
/// Timeout for one SMTP delivery or SMS gateway request
pub const NOTIFICATION_TIMEOUT_SECONDS: u64 = 30;
