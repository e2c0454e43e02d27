//! Email delivery via SMTP.
//!
//! STARTTLS relay when `enableSsl` is set, plain SMTP otherwise. Credentials
//! are sent only when a username is configured.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::warn;

use crate::config::{EmailSettings, NotificationTemplates};
use crate::error_handling::NotificationError;
use crate::notify::models::{PlannedNotification, SendAttempt};
use crate::notify::template::render;

/// SMTP channel.
#[derive(Clone)]
pub struct EmailChannel {
    settings: EmailSettings,
    templates: NotificationTemplates,
    timeout: Duration,
}

impl EmailChannel {
    pub fn new(settings: EmailSettings, templates: NotificationTemplates, timeout: Duration) -> Self {
        Self {
            settings,
            templates,
            timeout,
        }
    }

    /// A channel without recipients has nowhere to deliver.
    pub fn can_handle(&self, _event: &PlannedNotification) -> bool {
        !self.settings.to.is_empty()
    }

    /// Renders the event's subject and HTML body and sends them to every recipient.
    pub async fn send(&self, event: &PlannedNotification) -> SendAttempt {
        let template = event.event_type.template(&self.templates);
        let subject = render(&template.email_subject, &event.vars);
        let body = render(&template.email_html_body, &event.vars);
        let sent_to = self.settings.to.join(",");

        let error = match self.deliver(&subject, &body).await {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    "Email delivery failed for {} on {}: {e}",
                    event.event_type, event.check_id
                );
                Some(e.to_string())
            }
        };

        SendAttempt {
            success: error.is_none(),
            sent_to,
            subject,
            body,
            error,
        }
    }

    async fn deliver(&self, subject: &str, body: &str) -> Result<(), NotificationError> {
        let mut builder = Message::builder()
            .from(self.settings.from.parse()?)
            .subject(subject);
        for to in &self.settings.to {
            builder = builder.to(to.parse()?);
        }
        let message = builder
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())?;

        let mut transport = if self.settings.enable_ssl {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.settings.host)
        }
        .port(self.settings.port)
        .timeout(Some(self.timeout));

        if let Some(user) = self.settings.username.as_deref().filter(|u| !u.trim().is_empty()) {
            let password = self.settings.password.clone().unwrap_or_default();
            transport = transport.credentials(Credentials::new(user.to_string(), password));
        }

        transport.build().send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::models::EventType;
    use std::collections::BTreeMap;

    fn event() -> PlannedNotification {
        PlannedNotification {
            event_type: EventType::CheckFailed,
            check_id: "home".to_string(),
            check_name: "Homepage".to_string(),
            vars: BTreeMap::from([
                ("CheckName".to_string(), "Homepage".to_string()),
                ("Error".to_string(), "Status out of range: 503".to_string()),
            ]),
        }
    }

    fn templates() -> NotificationTemplates {
        let mut templates = NotificationTemplates::default();
        templates.check_failed.email_subject = "[FAIL] {{CheckName}}".to_string();
        templates.check_failed.email_html_body = "<p>{{Error}}</p>".to_string();
        templates
    }

    /// A port nothing listens on.
    fn closed_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    fn settings(port: u16) -> EmailSettings {
        EmailSettings {
            host: "127.0.0.1".to_string(),
            port,
            enable_ssl: false,
            from: "monitor@example.com".to_string(),
            to: vec!["ops@example.com".to_string(), "oncall@example.com".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_can_handle_requires_recipients() {
        let mut settings = settings(25);
        let channel = EmailChannel::new(settings.clone(), templates(), Duration::from_secs(1));
        assert!(channel.can_handle(&event()));

        settings.to.clear();
        let channel = EmailChannel::new(settings, templates(), Duration::from_secs(1));
        assert!(!channel.can_handle(&event()));
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_failure_with_rendered_message() {
        let channel = EmailChannel::new(settings(closed_port()), templates(), Duration::from_secs(2));
        let attempt = channel.send(&event()).await;

        assert!(!attempt.success);
        assert_eq!(attempt.sent_to, "ops@example.com,oncall@example.com");
        assert_eq!(attempt.subject, "[FAIL] Homepage");
        assert_eq!(attempt.body, "<p>Status out of range: 503</p>");
        assert!(attempt.error.unwrap().starts_with("SMTP transport error"));
    }

    #[tokio::test]
    async fn test_invalid_sender_address() {
        let mut settings = settings(closed_port());
        settings.from = "not an address".to_string();
        let channel = EmailChannel::new(settings, templates(), Duration::from_secs(1));

        let attempt = channel.send(&event()).await;
        assert!(!attempt.success);
        assert!(attempt.error.unwrap().starts_with("Email address parse error"));
    }
}
