//! Alerting: decide which events to send, render them, deliver them.
//!
//! - [`plan_notifications`] advances per-check state and applies cooldowns
//! - [`NotificationDispatcher`] delivers planned events over email and SMS
//! - [`render`] fills `{{Key}}` tokens in subjects and bodies

mod channels;
mod dispatcher;
mod models;
mod planner;
mod template;

pub use channels::{resolve_enabled_channels, EmailChannel, NotificationChannel, SmsChannel};
pub use dispatcher::{DispatchSummary, NotificationDispatcher};
pub use models::{EventType, PlannedNotification, SendAttempt};
pub use planner::plan_notifications;
pub use template::render;
