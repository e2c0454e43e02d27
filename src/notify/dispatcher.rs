//! Fan-out of planned notifications to channels, with audit logging.

use std::time::Duration;

use chrono::Utc;
use log::{info, warn};
use sqlx::SqlitePool;

use crate::config::{ChannelKind, NotificationsConfig, NOTIFICATION_TIMEOUT_SECONDS};
use crate::error_handling::{DatabaseError, InitializationError};
use crate::initialization::init_notification_client;
use crate::notify::channels::{EmailChannel, NotificationChannel, SmsChannel};
use crate::notify::models::PlannedNotification;
use crate::storage::{insert_notification_event, NotificationEventRecord};

/// Delivery totals for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Owns the channels (and the SMS HTTP client) for one run.
pub struct NotificationDispatcher {
    channels: Vec<NotificationChannel>,
}

impl NotificationDispatcher {
    /// Builds one channel per enabled kind that has settings.
    ///
    /// An enabled kind without its settings block is skipped with a warning.
    pub fn new(
        enabled: &[ChannelKind],
        config: Option<&NotificationsConfig>,
    ) -> Result<Self, InitializationError> {
        let timeout = Duration::from_secs(NOTIFICATION_TIMEOUT_SECONDS);
        let mut channels = Vec::new();

        let Some(config) = config else {
            if !enabled.is_empty() {
                warn!("Channels enabled but no notifications section configured");
            }
            return Ok(Self { channels });
        };

        for kind in enabled {
            match kind {
                ChannelKind::Email => match &config.email {
                    Some(email) => channels.push(NotificationChannel::Email(EmailChannel::new(
                        email.clone(),
                        config.templates.clone(),
                        timeout,
                    ))),
                    None => warn!("Email channel enabled but notifications.email is missing"),
                },
                ChannelKind::Sms => match &config.sms {
                    Some(sms) => {
                        let client = init_notification_client(timeout)?;
                        channels.push(NotificationChannel::Sms(SmsChannel::new(
                            sms.clone(),
                            config.templates.clone(),
                            client,
                        )))
                    }
                    None => warn!("SMS channel enabled but notifications.sms is missing"),
                },
            }
        }

        Ok(Self { channels })
    }

    pub fn channel_kinds(&self) -> Vec<ChannelKind> {
        self.channels.iter().map(NotificationChannel::kind).collect()
    }

    /// Sends every planned event on every channel that can handle it and
    /// records each attempt. A failed delivery never stops the others; only
    /// audit-log write failures are returned.
    pub async fn dispatch(
        &self,
        pool: &SqlitePool,
        planned: &[PlannedNotification],
    ) -> Result<DispatchSummary, DatabaseError> {
        let mut summary = DispatchSummary::default();

        for event in planned {
            for channel in self.channels.iter().filter(|c| c.can_handle(event)) {
                let kind = channel.kind();
                let attempt = channel.send(event).await;
                let dedupe_key = event.dedupe_key_for_channel(kind);
                let channel_name = kind.to_string();
                let event_type = event.event_type.to_string();

                insert_notification_event(
                    pool,
                    &NotificationEventRecord {
                        occurred_utc_unix: Utc::now().timestamp(),
                        channel: &channel_name,
                        event_type: &event_type,
                        check_id: &event.check_id,
                        check_name: &event.check_name,
                        dedupe_key: &dedupe_key,
                        sent_to: &attempt.sent_to,
                        subject: &attempt.subject,
                        body: &attempt.body,
                        success: attempt.success,
                        error: attempt.error.as_deref(),
                    },
                )
                .await?;

                summary.attempted += 1;
                if attempt.success {
                    summary.delivered += 1;
                    info!(
                        "Notification sent: {event_type} for {} via {channel_name} to {}",
                        event.check_id, attempt.sent_to
                    );
                } else {
                    summary.failed += 1;
                    warn!(
                        "Notification failed: {event_type} for {} via {channel_name}: {}",
                        event.check_id,
                        attempt.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }

        Ok(summary)
    }
}
