//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP clients (probe and notification)
//! - The process-wide rustls crypto provider

mod client;
mod logger;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::{init_notification_client, init_probe_client};
pub use logger::init_logger_with;

/// Initializes the crypto provider for TLS operations.
///
/// Installs `ring` as the process default for `rustls`. The TLS probe builds
/// its own config with an explicit provider, but lettre and reqwest rely on
/// the default being present.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}
