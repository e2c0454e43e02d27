//! Monitor configuration file model.
//!
//! These types mirror the JSON/YAML configuration document (camelCase keys).
//! Every field has a default so a minimal document only needs `checks`.
//! Enumerations are matched case-insensitively.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use strum_macros::{Display, EnumString};

use crate::config::constants::*;

/// Implements `TryFrom<String>` through strum's case-insensitive `FromStr`,
/// producing a readable serde error for unknown values.
macro_rules! case_insensitive_enum {
    ($ty:ident, $expected:literal) => {
        impl TryFrom<String> for $ty {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value
                    .trim()
                    .parse()
                    .map_err(|_| format!("expected {}, got '{}'", $expected, value))
            }
        }
    };
}

/// Check severity; only failed `Critical` checks change the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Critical,
}
case_insensitive_enum!(Severity, "Info|Warning|Critical");

/// HTTP method of the primary probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum HttpMethod {
    #[default]
    #[strum(serialize = "GET")]
    Get,
    #[strum(serialize = "POST")]
    Post,
    #[strum(serialize = "HEAD")]
    Head,
}
case_insensitive_enum!(HttpMethod, "GET|POST|HEAD");

impl From<HttpMethod> for reqwest::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// What an exceeded latency threshold does to the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum LatencyMode {
    /// No trigger at all
    Ignore,
    /// Trigger a SlowResponse alert, keep the verdict successful
    Warn,
    /// Trigger and fail the verdict
    #[default]
    Fail,
}
case_insensitive_enum!(LatencyMode, "Ignore|Warn|Fail");

/// Matching strategy of a content rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum ContentRuleKind {
    #[strum(serialize = "contains")]
    Contains,
    #[strum(serialize = "regex")]
    Regex,
}
case_insensitive_enum!(ContentRuleKind, "contains|regex");

/// Delivery channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum ChannelKind {
    #[strum(serialize = "email")]
    Email,
    #[strum(serialize = "sms")]
    Sms,
}
case_insensitive_enum!(ChannelKind, "email|sms");

/// HTTP method used to call the SMS gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum SmsMethod {
    #[default]
    #[strum(serialize = "POST")]
    Post,
    #[strum(serialize = "PUT")]
    Put,
    #[strum(serialize = "PATCH")]
    Patch,
}
case_insensitive_enum!(SmsMethod, "POST|PUT|PATCH");

impl From<SmsMethod> for reqwest::Method {
    fn from(m: SmsMethod) -> Self {
        match m {
            SmsMethod::Post => reqwest::Method::POST,
            SmsMethod::Put => reqwest::Method::PUT,
            SmsMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Root of the configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub app: AppSection,
    pub sqlite: SqliteSection,
    pub checks: Vec<CheckConfig>,
    pub notifications: Option<NotificationsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSection {
    pub name: String,
    pub environment: String,
    /// Informational only; scheduling is left to cron
    pub run_interval_hint_seconds: Option<u64>,
    pub timezone: Option<String>,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            run_interval_hint_seconds: Some(60),
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SqliteSection {
    pub db_path: String,
}

impl Default for SqliteSection {
    fn default() -> Self {
        Self {
            db_path: DB_PATH.to_string(),
        }
    }
}

/// One monitored target.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckConfig {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub severity: Severity,
    pub url: String,
    pub method: HttpMethod,
    pub timeout_seconds: u64,
    pub expected_status: ExpectedStatus,
    pub redirects: Option<RedirectConfig>,
    pub max_latency_ms: Option<u64>,
    pub latency_mode: Option<LatencyMode>,
    pub content_rule: Option<ContentRule>,
    pub login: Option<LoginConfig>,
    pub tls: Option<TlsThresholds>,
    pub headers: Vec<ExpectedHeader>,
    pub content_length: Option<ContentLengthBounds>,
    pub max_body_bytes: Option<usize>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            enabled: true,
            severity: Severity::default(),
            url: String::new(),
            method: HttpMethod::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            expected_status: ExpectedStatus::default(),
            redirects: None,
            max_latency_ms: None,
            latency_mode: None,
            content_rule: None,
            login: None,
            tls: None,
            headers: Vec::new(),
            content_length: None,
            max_body_bytes: None,
        }
    }
}

impl CheckConfig {
    /// Redirect budget, falling back to the default when not configured.
    pub fn max_redirects(&self) -> u32 {
        self.redirects
            .as_ref()
            .map(|r| r.max_redirects)
            .unwrap_or(DEFAULT_MAX_REDIRECTS)
    }

    /// Body read cap, falling back to the default when not configured.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    pub fn latency_mode(&self) -> LatencyMode {
        self.latency_mode.unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Inclusive expected status range.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpectedStatus {
    pub min: u16,
    pub max: u16,
}

impl Default for ExpectedStatus {
    fn default() -> Self {
        Self {
            min: DEFAULT_EXPECTED_STATUS_MIN,
            max: DEFAULT_EXPECTED_STATUS_MAX,
        }
    }
}

impl ExpectedStatus {
    pub fn contains(&self, status: u16) -> bool {
        status >= self.min && status <= self.max
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RedirectConfig {
    pub max_redirects: u32,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// A content rule: substring or regex marker expected in a decoded body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRule {
    #[serde(rename = "type", default = "default_rule_kind")]
    pub kind: ContentRuleKind,
    #[serde(default)]
    pub value: String,
}

fn default_rule_kind() -> ContentRuleKind {
    ContentRuleKind::Contains
}

/// Authenticated flow: optional cookie-seeding GET, form POST, optional post-login GET.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginConfig {
    pub login_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub username_field: String,
    pub password_field: String,
    pub additional_fields: BTreeMap<String, String>,
    pub success_indicator: Option<ContentRule>,
    pub post_login_url: Option<String>,
    pub post_login_rule: Option<ContentRule>,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            login_url: String::new(),
            username: None,
            password: None,
            username_field: "username".to_string(),
            password_field: "password".to_string(),
            additional_fields: BTreeMap::new(),
            success_indicator: None,
            post_login_url: None,
            post_login_rule: None,
        }
    }
}

impl LoginConfig {
    /// Form fields for the login POST. Additional fields override credentials
    /// that share a name.
    pub fn form_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert(
            self.username_field.clone(),
            self.username.clone().unwrap_or_default(),
        );
        fields.insert(
            self.password_field.clone(),
            self.password.clone().unwrap_or_default(),
        );
        for (k, v) in &self.additional_fields {
            fields.insert(k.clone(), v.clone());
        }
        fields
    }

    /// Post-login URL when one is configured and not blank.
    pub fn post_login_url(&self) -> Option<&str> {
        self.post_login_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
    }
}

/// Certificate expiry thresholds, in whole days remaining.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TlsThresholds {
    pub warn_days_remaining: Option<i64>,
    pub min_days_remaining: Option<i64>,
}

/// A response header that must exist and contain a substring (case-insensitive).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpectedHeader {
    pub name: String,
    pub contains: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentLengthBounds {
    pub min_bytes: Option<usize>,
    pub max_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationsConfig {
    pub enabled_channels: Vec<ChannelKind>,
    pub rules: NotificationRules,
    pub templates: NotificationTemplates,
    pub email: Option<EmailSettings>,
    pub sms: Option<SmsSettings>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationRules {
    pub consecutive_failures: u32,
    pub cooldown_seconds: i64,
}

impl Default for NotificationRules {
    fn default() -> Self {
        Self {
            consecutive_failures: DEFAULT_CONSECUTIVE_FAILURES,
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationTemplates {
    pub check_failed: NotificationTemplate,
    pub recovered: NotificationTemplate,
    pub slow_response: NotificationTemplate,
    pub cert_expiring: NotificationTemplate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationTemplate {
    pub email_subject: String,
    pub email_html_body: String,
    pub sms_text_body: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailSettings {
    pub host: String,
    pub port: u16,
    pub enable_ssl: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub to: Vec<String>,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            enable_ssl: true,
            username: None,
            password: None,
            from: String::new(),
            to: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmsSettings {
    pub endpoint: String,
    pub method: SmsMethod,
    pub content_type: String,
    pub headers: BTreeMap<String, String>,
    /// Gateway payload; `{{Body}}` receives the rendered SMS text
    pub body_template: String,
}

impl Default for SmsSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            method: SmsMethod::default(),
            content_type: DEFAULT_SMS_CONTENT_TYPE.to_string(),
            headers: BTreeMap::new(),
            body_template: DEFAULT_SMS_BODY_TEMPLATE.to_string(),
        }
    }
}
