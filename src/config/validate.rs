//! Semantic validation of a loaded configuration.
//!
//! Validation is fail-fast: the first violation aborts the run before any
//! check executes.

use std::collections::HashSet;

use url::Url;

use crate::config::constants::{
    MAX_BODY_BYTES_CAP, MAX_TIMEOUT_SECONDS, MIN_BODY_BYTES_CAP, MIN_TIMEOUT_SECONDS,
};
use crate::config::model::{AppConfig, CheckConfig, ContentRule, LoginConfig};
use crate::error_handling::ConfigError;

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn is_absolute_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Validates `cfg`, returning the first violation found.
pub fn validate_config(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.sqlite.db_path.trim().is_empty() {
        return Err(invalid("sqlite.dbPath is required"));
    }

    if cfg.checks.is_empty() {
        return Err(invalid("checks must contain at least one check"));
    }

    let mut ids = HashSet::new();
    for check in &cfg.checks {
        if check.id.trim().is_empty() {
            return Err(invalid("Each check must have an id"));
        }
        if !ids.insert(check.id.to_lowercase()) {
            return Err(invalid(format!("Duplicate check id: {}", check.id)));
        }
        validate_check(check)?;
    }

    if let Some(notifications) = &cfg.notifications {
        if notifications.rules.consecutive_failures < 1 {
            return Err(invalid("notifications.rules.consecutiveFailures must be >= 1"));
        }
    }

    Ok(())
}

fn validate_check(c: &CheckConfig) -> Result<(), ConfigError> {
    let id = &c.id;

    if c.name.trim().is_empty() {
        return Err(invalid(format!("Check {id} must have a name")));
    }
    if c.url.trim().is_empty() {
        return Err(invalid(format!("Check {id} must have a url")));
    }
    if !is_absolute_url(&c.url) {
        return Err(invalid(format!(
            "Check {id} url is not a valid absolute URI: {}",
            c.url
        )));
    }

    if !(MIN_TIMEOUT_SECONDS..=MAX_TIMEOUT_SECONDS).contains(&c.timeout_seconds) {
        return Err(invalid(format!(
            "Check {id} timeoutSeconds must be {MIN_TIMEOUT_SECONDS}..{MAX_TIMEOUT_SECONDS}"
        )));
    }

    let status = c.expected_status;
    if status.min < 100 || status.max > 599 || status.min > status.max {
        return Err(invalid(format!(
            "Check {id} expectedStatus must be 100..599 and min<=max"
        )));
    }

    if let Some(rule) = &c.content_rule {
        validate_content_rule(id, rule)?;
    }

    if let Some(login) = &c.login {
        validate_login(id, login)?;
    }

    if c.headers.iter().any(|h| h.name.trim().is_empty()) {
        return Err(invalid(format!("Check {id} headers[] requires name")));
    }

    if let Some(bounds) = &c.content_length {
        if let (Some(min), Some(max)) = (bounds.min_bytes, bounds.max_bytes) {
            if min > max {
                return Err(invalid(format!(
                    "Check {id} contentLength minBytes > maxBytes"
                )));
            }
        }
    }

    if let Some(cap) = c.max_body_bytes {
        if !(MIN_BODY_BYTES_CAP..=MAX_BODY_BYTES_CAP).contains(&cap) {
            return Err(invalid(format!(
                "Check {id} maxBodyBytes should be between {MIN_BODY_BYTES_CAP} and {MAX_BODY_BYTES_CAP}"
            )));
        }
    }

    Ok(())
}

fn validate_content_rule(id: &str, rule: &ContentRule) -> Result<(), ConfigError> {
    if rule.value.trim().is_empty() {
        return Err(invalid(format!("Check {id} contentRule.value is required")));
    }
    Ok(())
}

fn validate_login(id: &str, login: &LoginConfig) -> Result<(), ConfigError> {
    if login.login_url.trim().is_empty() {
        return Err(invalid(format!("Check {id} login.loginUrl is required")));
    }
    if !is_absolute_url(&login.login_url) {
        return Err(invalid(format!(
            "Check {id} login.loginUrl is invalid: {}",
            login.login_url
        )));
    }
    if login.username_field.trim().is_empty() {
        return Err(invalid(format!("Check {id} login.usernameField is required")));
    }
    if login.password_field.trim().is_empty() {
        return Err(invalid(format!("Check {id} login.passwordField is required")));
    }
    if let Some(rule) = &login.success_indicator {
        validate_content_rule(id, rule)?;
    }
    if let Some(rule) = &login.post_login_rule {
        validate_content_rule(id, rule)?;
    }
    Ok(())
}
