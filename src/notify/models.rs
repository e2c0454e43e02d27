//! Notification events and delivery attempts.

use std::collections::BTreeMap;

use strum_macros::{Display as DisplayMacro, EnumIter as EnumIterMacro};

use crate::config::{ChannelKind, NotificationTemplate, NotificationTemplates};

/// Kind of alert a verdict can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DisplayMacro, EnumIterMacro)]
pub enum EventType {
    CheckFailed,
    Recovered,
    SlowResponse,
    CertExpiring,
}

impl EventType {
    /// Template block used to render this event.
    pub fn template<'a>(&self, templates: &'a NotificationTemplates) -> &'a NotificationTemplate {
        match self {
            EventType::CheckFailed => &templates.check_failed,
            EventType::Recovered => &templates.recovered,
            EventType::SlowResponse => &templates.slow_response,
            EventType::CertExpiring => &templates.cert_expiring,
        }
    }
}

/// An alert the decision engine wants delivered this run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedNotification {
    pub event_type: EventType,
    pub check_id: String,
    pub check_name: String,
    /// Template variables (`{{Key}}`)
    pub vars: BTreeMap<String, String>,
}

impl PlannedNotification {
    /// `channel:eventType:checkId`, the unit of cooldown suppression.
    pub fn dedupe_key_for_channel(&self, channel: ChannelKind) -> String {
        dedupe_key(channel, self.event_type, &self.check_id)
    }
}

pub(crate) fn dedupe_key(channel: ChannelKind, event_type: EventType, check_id: &str) -> String {
    format!("{channel}:{event_type}:{check_id}")
}

/// What a channel reports after trying to deliver one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAttempt {
    pub success: bool,
    pub sent_to: String,
    pub subject: String,
    pub body: String,
    pub error: Option<String>,
}
