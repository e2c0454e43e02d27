//! SMS delivery through an HTTP gateway.
//!
//! The gateway payload is `bodyTemplate` rendered with the event variables plus
//! `Body`, the rendered `smsTextBody`. Any 2xx response counts as delivered.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::config::{NotificationTemplates, SmsSettings};
use crate::error_handling::NotificationError;
use crate::notify::models::{PlannedNotification, SendAttempt};
use crate::notify::template::render;

/// HTTP gateway channel. The client is shared with the dispatcher that built it.
#[derive(Clone)]
pub struct SmsChannel {
    settings: SmsSettings,
    templates: NotificationTemplates,
    client: reqwest::Client,
}

impl SmsChannel {
    pub fn new(settings: SmsSettings, templates: NotificationTemplates, client: reqwest::Client) -> Self {
        Self {
            settings,
            templates,
            client,
        }
    }

    pub fn can_handle(&self, _event: &PlannedNotification) -> bool {
        !self.settings.endpoint.trim().is_empty()
    }

    pub async fn send(&self, event: &PlannedNotification) -> SendAttempt {
        let template = event.event_type.template(&self.templates);
        let text = render(&template.sms_text_body, &event.vars);

        let mut vars = event.vars.clone();
        vars.insert("Body".to_string(), text);
        let body = render(&self.settings.body_template, &vars);

        let error = match self.deliver(&body).await {
            Ok(()) => None,
            Err(e) => {
                log::warn!(
                    "SMS delivery failed for {} on {}: {e}",
                    event.event_type,
                    event.check_id
                );
                Some(e)
            }
        };

        SendAttempt {
            success: error.is_none(),
            sent_to: self.settings.endpoint.clone(),
            subject: String::new(),
            body,
            error,
        }
    }

    /// `Err` carries the text recorded in the audit log.
    async fn deliver(&self, body: &str) -> Result<(), String> {
        let headers = self.headers().map_err(|e| e.to_string())?;
        let response = self
            .client
            .request(self.settings.method.into(), &self.settings.endpoint)
            .headers(headers)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| NotificationError::Http(e).to_string())?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
            .trim_end()
            .to_string())
        }
    }

    fn headers(&self) -> Result<HeaderMap, NotificationError> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.settings.content_type) {
            headers.insert(CONTENT_TYPE, value);
        }
        for (name, value) in &self.settings.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| NotificationError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| NotificationError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}
