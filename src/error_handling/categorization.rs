//! Error categorization.
//!
//! Maps probe failures onto an `ErrorType` so a failed verdict carries a
//! stable cause kind in front of the transport's own message.

use std::error::Error as StdError;

use super::types::{CheckError, ErrorType, FetchError, InitializationError};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Probes never ask reqwest to error on status codes, so only the transport
/// classification matters here.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes a `FetchError` into an `ErrorType`.
pub fn categorize_fetch_error(error: &FetchError) -> ErrorType {
    match error {
        FetchError::Http(e) => categorize_reqwest_error(e),
        FetchError::InvalidUrl { .. } => ErrorType::InvalidUrlError,
    }
}

/// Renders `error` followed by its source chain, joined with `": "`.
///
/// reqwest's own message only names the request ("error sending request for
/// url ..."); the underlying cause (timed out, connection refused, ...) lives
/// in the sources. Consecutive duplicate messages are collapsed.
pub fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if parts.last() != Some(&msg) {
            parts.push(msg);
        }
        source = cause.source();
    }
    parts.join(": ")
}

/// Formats a failure as `"<cause kind>: <message>"` for the verdict's error text.
pub fn describe_fetch_error(error: &FetchError) -> String {
    let message = match error {
        FetchError::Http(e) => error_chain_message(e),
        FetchError::InvalidUrl { .. } => error.to_string(),
    };
    format!("{}: {}", categorize_fetch_error(error), message)
}

/// Formats an aborted check evaluation as `"<cause kind>: <message>"`.
pub fn describe_check_error(error: &CheckError) -> String {
    match error {
        CheckError::Fetch(e) => describe_fetch_error(e),
        CheckError::Client(InitializationError::HttpClientError(e)) => {
            format!("{}: {}", categorize_reqwest_error(e), error_chain_message(e))
        }
        CheckError::Client(e) => format!("{}: {}", ErrorType::HttpRequestOtherError, e),
    }
}
