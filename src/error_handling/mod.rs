//! Error handling.
//!
//! This module provides:
//! - Error type definitions for every library layer
//! - Cause categorization for failed verdicts
//!
//! Errors fall into three groups:
//! - **Fatal**: configuration and database errors abort the run
//! - **Contained**: probe errors are folded into a failed verdict
//! - **Auxiliary**: TLS probe and notification errors are logged and recorded only

mod categorization;
mod types;

// Re-export public API
pub use categorization::describe_check_error;
pub use types::{
    CheckError, ConfigError, DatabaseError, ErrorType, FetchError, InitializationError, NotificationError,
    TlsProbeError,
};
