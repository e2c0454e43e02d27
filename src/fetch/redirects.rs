//! Redirect classification and `Location` resolution.
//!
//! The probe client never follows redirects itself; these helpers let the
//! fetch loop decide whether a response is a hop and where it points.

use log::warn;
use reqwest::header::LOCATION;
use reqwest::{Method, Response};
use url::Url;

use crate::error_handling::FetchError;

/// Redirect statuses the fetch loop follows.
pub fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Method for the next hop: 301/302/303 switch to GET, 307/308 keep the method.
pub fn next_method(status: u16, current: &Method) -> Method {
    match status {
        301..=303 => Method::GET,
        _ => current.clone(),
    }
}

/// The `Location` header of a redirect response, if present and readable.
pub fn location_header(response: &Response) -> Option<String> {
    let value = response.headers().get(LOCATION)?;
    match value.to_str() {
        Ok(loc) if !loc.trim().is_empty() => Some(loc.trim().to_string()),
        _ => {
            warn!(
                "Redirect status {} for {} has an unusable Location header",
                response.status().as_u16(),
                response.url()
            );
            None
        }
    }
}

/// Resolves `location` against `base`: an absolute location wins, a relative
/// one is joined onto the current request URI.
pub fn resolve_location(base: &Url, location: &str) -> Result<Url, FetchError> {
    Url::parse(location)
        .or_else(|_| base.join(location))
        .map_err(|source| FetchError::InvalidUrl {
            url: location.to_string(),
            source,
        })
}
