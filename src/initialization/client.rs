//! HTTP client initialization.
//!
//! Probe clients never follow redirects themselves; the fetch layer drives
//! the redirect chain so it can count and cap hops.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::USER_AGENT;
use crate::error_handling::InitializationError;

/// Builds a client for one check.
///
/// - redirects disabled (`Policy::none()`)
/// - per-request timeout from the check
/// - optional cookie jar, used by the login flow so every step shares one session
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the TLS backend cannot be set up.
pub fn init_probe_client(
    timeout: Duration,
    with_cookies: bool,
) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .cookie_store(with_cookies)
        .build()?;
    Ok(client)
}

/// Builds the client used by the SMS channel. Owned by the notification
/// dispatcher and dropped when the run ends.
pub fn init_notification_client(timeout: Duration) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
