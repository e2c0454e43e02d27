//! Utility functions.
//!
//! This module provides string sanitization and truncation helpers shared by
//! the validators, the executor and the notification layer.

pub mod sanitize;

pub use sanitize::{sanitize_error_message, truncate_with_ellipsis};
