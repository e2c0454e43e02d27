//! Delivery channels.
//!
//! Each channel renders the event with its own template fields and reports a
//! [`SendAttempt`]; delivery errors never escape as `Err`.

mod email;
mod sms;

use crate::config::ChannelKind;
use crate::notify::models::{PlannedNotification, SendAttempt};

pub use email::EmailChannel;
pub use sms::SmsChannel;

/// A configured delivery channel.
#[derive(Clone)]
pub enum NotificationChannel {
    Email(EmailChannel),
    Sms(SmsChannel),
}

impl NotificationChannel {
    pub fn kind(&self) -> ChannelKind {
        match self {
            NotificationChannel::Email(_) => ChannelKind::Email,
            NotificationChannel::Sms(_) => ChannelKind::Sms,
        }
    }

    pub fn can_handle(&self, event: &PlannedNotification) -> bool {
        match self {
            NotificationChannel::Email(channel) => channel.can_handle(event),
            NotificationChannel::Sms(channel) => channel.can_handle(event),
        }
    }

    pub async fn send(&self, event: &PlannedNotification) -> SendAttempt {
        match self {
            NotificationChannel::Email(channel) => channel.send(event).await,
            NotificationChannel::Sms(channel) => channel.send(event).await,
        }
    }
}

/// Channels enabled for this run.
///
/// `--email` / `--sms` replace `notifications.enabledChannels` entirely when
/// either is given.
pub fn resolve_enabled_channels(
    cli_email: bool,
    cli_sms: bool,
    configured: &[ChannelKind],
) -> Vec<ChannelKind> {
    if cli_email || cli_sms {
        return [(cli_email, ChannelKind::Email), (cli_sms, ChannelKind::Sms)]
            .into_iter()
            .filter_map(|(on, kind)| on.then_some(kind))
            .collect();
    }

    let mut enabled = Vec::new();
    for kind in configured {
        if !enabled.contains(kind) {
            enabled.push(*kind);
        }
    }
    enabled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_config() {
        assert_eq!(
            resolve_enabled_channels(false, true, &[ChannelKind::Email]),
            [ChannelKind::Sms]
        );
        assert_eq!(
            resolve_enabled_channels(true, true, &[]),
            [ChannelKind::Email, ChannelKind::Sms]
        );
    }

    #[test]
    fn test_config_used_without_flags() {
        assert_eq!(
            resolve_enabled_channels(
                false,
                false,
                &[ChannelKind::Sms, ChannelKind::Email, ChannelKind::Sms]
            ),
            [ChannelKind::Sms, ChannelKind::Email]
        );
        assert!(resolve_enabled_channels(false, false, &[]).is_empty());
    }
}
