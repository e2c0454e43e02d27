//! HTTP probe: one logical exchange with a manually driven redirect chain.
//!
//! The client must have redirects disabled (see
//! [`crate::initialization::init_probe_client`]). Each hop is counted against
//! the budget; once the budget is spent the redirect response itself is
//! returned and the caller decides what that means.

mod redirects;
mod response;

use std::collections::BTreeMap;
use std::time::Instant;

use log::debug;
use reqwest::Method;
use url::Url;

use crate::error_handling::FetchError;

pub use redirects::{is_redirect_status, next_method, resolve_location};
pub use response::merge_headers;

/// One probe request.
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    /// Form fields sent url-encoded with the first request only
    pub form: Option<&'a BTreeMap<String, String>>,
    pub max_redirects: u32,
    pub max_body_bytes: usize,
}

/// Outcome of a probe: the final response after the redirect chain.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    /// Lower-cased header name to comma-joined values
    pub headers: BTreeMap<String, String>,
    /// At most `max_body_bytes`
    pub body: Vec<u8>,
    pub redirect_count: u32,
    pub final_url: Url,
    /// From first send to end of body read, redirect round-trips included
    pub elapsed_ms: u64,
}

impl FetchResult {
    /// Body decoded as UTF-8 (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Performs `request`, following up to `max_redirects` hops.
///
/// 301/302/303 continue as GET. 307/308 keep the method, but the form body is
/// only ever sent with the first request.
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` for an unparseable start URL or
/// `Location`, and `FetchError::Http` for transport failures.
pub async fn fetch(
    client: &reqwest::Client,
    request: FetchRequest<'_>,
) -> Result<FetchResult, FetchError> {
    let started = Instant::now();
    let mut current = Url::parse(request.url).map_err(|source| FetchError::InvalidUrl {
        url: request.url.to_string(),
        source,
    })?;
    let mut method = request.method.clone();
    let mut form = request.form;
    let mut redirect_count = 0u32;

    loop {
        let mut builder = client.request(method.clone(), current.clone());
        if let Some(fields) = form {
            builder = builder.form(fields);
        }
        let mut resp = builder.send().await?;
        let status = resp.status().as_u16();

        if is_redirect_status(status) && redirect_count < request.max_redirects {
            if let Some(location) = redirects::location_header(&resp) {
                let next = resolve_location(&current, &location)?;
                redirect_count += 1;
                debug!("Redirect {status} #{redirect_count}: {current} -> {next}");
                method = next_method(status, &method);
                form = None;
                current = next;
                continue;
            }
        }

        let headers = merge_headers(resp.headers());
        let body = response::read_capped_body(&mut resp, request.max_body_bytes).await?;

        return Ok(FetchResult {
            status,
            headers,
            body,
            redirect_count,
            final_url: current,
            elapsed_ms: started.elapsed().as_millis() as u64,
        });
    }
}
