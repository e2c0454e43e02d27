//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, defaults)
//! - CLI option types and parsing
//! - The JSON/YAML configuration model, loading, `${VAR}` expansion and validation
//! - Starter template generation

mod constants;
mod env;
mod load;
mod model;
mod templates;
mod types;
mod validate;

// Re-export all constants
pub use constants::*;
pub use env::{expand_env_vars, expand_in_place};
pub use load::{load_and_validate, load_config, resolve_config_path};
pub use model::{
    AppConfig, AppSection, ChannelKind, CheckConfig, ContentLengthBounds, ContentRule,
    ContentRuleKind, EmailSettings, ExpectedHeader, ExpectedStatus, HttpMethod, LatencyMode,
    LoginConfig, NotificationRules, NotificationTemplate, NotificationTemplates,
    NotificationsConfig, RedirectConfig, Severity, SmsMethod, SmsSettings, SqliteSection,
    TlsThresholds,
};
pub use templates::{write_template, TemplateFormat, JSON_TEMPLATE, YAML_TEMPLATE};
pub use types::{Config, LogFormat, LogLevel, Opt};
pub use validate::validate_config;
