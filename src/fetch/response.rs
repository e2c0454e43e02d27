//! Final-response handling: header merge and capped body read.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::Response;

/// Merges response headers into one map keyed by lower-cased name.
///
/// Repeated header lines are joined with `,` in arrival order.
pub fn merge_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        merged.insert(name.as_str().to_ascii_lowercase(), joined);
    }
    merged
}

/// Reads at most `max_bytes` of the body. Anything beyond the cap is dropped
/// without error.
pub async fn read_capped_body(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while body.len() < max_bytes {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let remaining = max_bytes - body.len();
        body.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
    }
    Ok(body)
}
