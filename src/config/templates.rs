//! Starter configuration documents written by `--generate-json-config` and
//! `--generate-yaml-config`.

use std::path::{Path, PathBuf};

use log::info;

use crate::error_handling::ConfigError;

/// Output format of a generated template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Json,
    Yaml,
}

impl TemplateFormat {
    /// File written when no `--config` path is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            TemplateFormat::Json => "config.json",
            TemplateFormat::Yaml => "config.yaml",
        }
    }

    pub fn contents(self) -> &'static str {
        match self {
            TemplateFormat::Json => JSON_TEMPLATE,
            TemplateFormat::Yaml => YAML_TEMPLATE,
        }
    }
}

pub const JSON_TEMPLATE: &str = r##"{
  "app": {
    "name": "WebsiteMonitor",
    "environment": "local",
    "runIntervalHintSeconds": 60,
    "timezone": "Australia/Sydney"
  },
  "sqlite": {
    "dbPath": "./monitor.db"
  },
  "checks": [
    {
      "id": "home",
      "name": "Homepage",
      "enabled": true,
      "severity": "Critical",
      "url": "https://example.com/",
      "method": "GET",
      "timeoutSeconds": 15,
      "expectedStatus": { "min": 200, "max": 299 },
      "redirects": { "maxRedirects": 5 },
      "maxLatencyMs": 1500,
      "latencyMode": "Warn",
      "contentRule": { "type": "contains", "value": "Example Domain" },
      "headers": [
        { "name": "Content-Type", "contains": "text/html" }
      ],
      "contentLength": { "minBytes": 50, "maxBytes": 500000 },
      "tls": { "warnDaysRemaining": 30, "minDaysRemaining": 7 },
      "maxBodyBytes": 1048576
    }
  ],
  "notifications": {
    "enabledChannels": [ "email" ],
    "rules": { "consecutiveFailures": 2, "cooldownSeconds": 600 },
    "templates": {
      "checkFailed": {
        "emailSubject": "[{{Environment}}] FAIL: {{CheckName}}",
        "emailHtmlBody": "<h3>FAIL</h3><p><b>{{CheckName}}</b> - {{Url}}</p><p>Status: {{StatusCode}} Latency: {{LatencyMs}}ms</p><pre>{{Error}}</pre><p>{{UtcNow}}</p>",
        "smsTextBody": "FAIL {{Environment}} {{CheckName}} {{StatusCode}} {{LatencyMs}}ms {{Url}}"
      },
      "recovered": {
        "emailSubject": "[{{Environment}}] OK: {{CheckName}} recovered",
        "emailHtmlBody": "<h3>RECOVERED</h3><p>{{CheckName}} - {{Url}}</p><p>{{UtcNow}}</p>",
        "smsTextBody": "OK {{Environment}} {{CheckName}} recovered {{Url}}"
      },
      "slowResponse": {
        "emailSubject": "[{{Environment}}] SLOW: {{CheckName}}",
        "emailHtmlBody": "<h3>SLOW</h3><p>{{CheckName}} {{LatencyMs}}ms (max {{MaxLatencyMs}}ms)</p><p>{{Url}}</p><p>{{UtcNow}}</p>",
        "smsTextBody": "SLOW {{Environment}} {{CheckName}} {{LatencyMs}}ms/{{MaxLatencyMs}}ms {{Url}}"
      },
      "certExpiring": {
        "emailSubject": "[{{Environment}}] CERT: {{CheckName}} expiring",
        "emailHtmlBody": "<h3>CERT EXPIRING</h3><p>{{CheckName}} {{Url}}</p><p>Days remaining: {{CertDaysRemaining}}</p><p>{{UtcNow}}</p>",
        "smsTextBody": "CERT {{Environment}} {{CheckName}} {{CertDaysRemaining}}d {{Url}}"
      }
    },
    "email": {
      "host": "smtp.example.com",
      "port": 587,
      "enableSsl": true,
      "username": "${SMTP_USER}",
      "password": "${SMTP_PASS}",
      "from": "monitor@example.com",
      "to": [ "ops@example.com" ]
    },
    "sms": {
      "endpoint": "https://sms-gateway.example.com/messages",
      "method": "POST",
      "contentType": "application/json",
      "headers": {
        "Authorization": "Bearer ${SMS_TOKEN}"
      },
      "bodyTemplate": "{ \"to\": \"+61400111222\", \"message\": \"{{Body}}\" }"
    }
  }
}
"##;

pub const YAML_TEMPLATE: &str = r##"app:
  name: WebsiteMonitor
  environment: local
  runIntervalHintSeconds: 60
  timezone: Australia/Sydney

sqlite:
  dbPath: ./monitor.db

checks:
  - id: home
    name: Homepage
    enabled: true
    severity: Critical
    url: https://example.com/
    method: GET
    timeoutSeconds: 15
    expectedStatus:
      min: 200
      max: 299
    redirects:
      maxRedirects: 5
    maxLatencyMs: 1500
    latencyMode: Warn
    contentRule:
      type: contains
      value: Example Domain
    headers:
      - name: Content-Type
        contains: text/html
    contentLength:
      minBytes: 50
      maxBytes: 500000
    tls:
      warnDaysRemaining: 30
      minDaysRemaining: 7
    maxBodyBytes: 1048576

notifications:
  enabledChannels:
    - email
  rules:
    consecutiveFailures: 2
    cooldownSeconds: 600
  templates:
    checkFailed:
      emailSubject: "[{{Environment}}] FAIL: {{CheckName}}"
      emailHtmlBody: "<h3>FAIL</h3><p><b>{{CheckName}}</b> - {{Url}}</p><p>Status: {{StatusCode}} Latency: {{LatencyMs}}ms</p><pre>{{Error}}</pre><p>{{UtcNow}}</p>"
      smsTextBody: "FAIL {{Environment}} {{CheckName}} {{StatusCode}} {{LatencyMs}}ms {{Url}}"
    recovered:
      emailSubject: "[{{Environment}}] OK: {{CheckName}} recovered"
      emailHtmlBody: "<h3>RECOVERED</h3><p>{{CheckName}} - {{Url}}</p><p>{{UtcNow}}</p>"
      smsTextBody: "OK {{Environment}} {{CheckName}} recovered {{Url}}"
    slowResponse:
      emailSubject: "[{{Environment}}] SLOW: {{CheckName}}"
      emailHtmlBody: "<h3>SLOW</h3><p>{{CheckName}} {{LatencyMs}}ms (max {{MaxLatencyMs}}ms)</p><p>{{Url}}</p><p>{{UtcNow}}</p>"
      smsTextBody: "SLOW {{Environment}} {{CheckName}} {{LatencyMs}}ms/{{MaxLatencyMs}}ms {{Url}}"
    certExpiring:
      emailSubject: "[{{Environment}}] CERT: {{CheckName}} expiring"
      emailHtmlBody: "<h3>CERT EXPIRING</h3><p>{{CheckName}} {{Url}}</p><p>Days remaining: {{CertDaysRemaining}}</p><p>{{UtcNow}}</p>"
      smsTextBody: "CERT {{Environment}} {{CheckName}} {{CertDaysRemaining}}d {{Url}}"
  email:
    host: smtp.example.com
    port: 587
    enableSsl: true
    username: ${SMTP_USER}
    password: ${SMTP_PASS}
    from: monitor@example.com
    to:
      - ops@example.com
  sms:
    endpoint: https://sms-gateway.example.com/messages
    method: POST
    contentType: application/json
    headers:
      Authorization: "Bearer ${SMS_TOKEN}"
    bodyTemplate: '{ "to": "+61400111222", "message": "{{Body}}" }'
"##;

/// Writes the starter template for `format` to `path` (or the format's default
/// file name in the working directory) and returns the path written.
pub fn write_template(
    format: TemplateFormat,
    path: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    let target = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    std::fs::write(&target, format.contents()).map_err(|source| ConfigError::Io {
        path: target.clone(),
        source,
    })?;

    info!("Config template written: {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{AppConfig, LatencyMode};
    use crate::config::validate::validate_config;

    #[test]
    fn test_json_template_parses_and_validates() {
        let cfg: AppConfig = serde_json::from_str(JSON_TEMPLATE).unwrap();
        validate_config(&cfg).unwrap();
        assert_eq!(cfg.checks[0].latency_mode(), LatencyMode::Warn);
    }

    #[test]
    fn test_yaml_template_parses_and_validates() {
        let cfg: AppConfig = serde_yaml::from_str(YAML_TEMPLATE).unwrap();
        validate_config(&cfg).unwrap();
        let notifications = cfg.notifications.unwrap();
        assert_eq!(notifications.rules.consecutive_failures, 2);
        assert!(notifications
            .sms
            .unwrap()
            .body_template
            .contains("{{Body}}"));
    }

    #[test]
    fn test_templates_agree() {
        let json: AppConfig = serde_json::from_str(JSON_TEMPLATE).unwrap();
        let yaml: AppConfig = serde_yaml::from_str(YAML_TEMPLATE).unwrap();
        assert_eq!(json.checks[0].id, yaml.checks[0].id);
        assert_eq!(
            json.notifications.unwrap().sms.unwrap().body_template,
            yaml.notifications.unwrap().sms.unwrap().body_template
        );
    }

    #[test]
    fn test_write_template_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monitor.yaml");
        let written = write_template(TemplateFormat::Yaml, Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), YAML_TEMPLATE);
    }
}
