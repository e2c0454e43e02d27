//! Configuration types and CLI options.
//!
//! This module defines the command-line parser (`Opt`), the logging enums and
//! the library-level run configuration (`Config`).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for log shippers
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "site_monitor",
    version,
    about = "Cron-friendly website monitor: one pass over the configured checks, then exit.",
    after_help = "Exit codes:\n  0 = OK (or warnings only)\n  1 = internal or configuration error\n  2 = Critical check failed"
)]
pub struct Opt {
    /// Path to config.json / config.yaml / config.yml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a default JSON config template and exit
    #[arg(long, conflicts_with = "generate_yaml_config")]
    pub generate_json_config: bool,

    /// Write a default YAML config template and exit
    #[arg(long)]
    pub generate_yaml_config: bool,

    /// Enable email notifications (SMTP) for this run
    #[arg(long)]
    pub email: bool,

    /// Enable SMS notifications (HTTP gateway) for this run
    #[arg(long)]
    pub sms: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

/// Library configuration for one monitoring pass (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use site_monitor::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     config_path: PathBuf::from("config.yaml"),
///     enable_email: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Monitor configuration file (JSON or YAML)
    pub config_path: PathBuf,

    /// Force-enable the email channel, overriding `notifications.enabledChannels`
    pub enable_email: bool,

    /// Force-enable the SMS channel, overriding `notifications.enabledChannels`
    pub enable_sms: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.yaml"),
            enable_email: false,
            enable_sms: false,
        }
    }
}
