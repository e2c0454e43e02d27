//! Single-request flow: one probe, then every validation in turn.

use crate::check::models::CheckResult;
use crate::config::{CheckConfig, MAX_DIAGNOSTIC_CHARS};
use crate::content;
use crate::error_handling::CheckError;
use crate::fetch::{fetch, is_redirect_status, FetchRequest, FetchResult};
use crate::initialization::init_probe_client;
use crate::utils::truncate_with_ellipsis;

pub(super) async fn run(
    check: &CheckConfig,
    result: &mut CheckResult,
) -> Result<Vec<String>, CheckError> {
    let client = init_probe_client(check.timeout(), false)?;
    let fetched = fetch(
        &client,
        FetchRequest {
            method: check.method.into(),
            url: &check.url,
            form: None,
            max_redirects: check.max_redirects(),
            max_body_bytes: check.max_body_bytes(),
        },
    )
    .await?;

    result.record_step(&fetched);
    Ok(validate(check, &fetched))
}

/// All validations, accumulated rather than stopping at the first failure.
pub(super) fn validate(check: &CheckConfig, fetched: &FetchResult) -> Vec<String> {
    let mut errors = Vec::new();
    let expected = check.expected_status;

    if !expected.contains(fetched.status) {
        errors.push(format!(
            "Status out of range: {} (expected {}-{})",
            fetched.status, expected.min, expected.max
        ));
    }

    for header in &check.headers {
        match fetched.header(&header.name) {
            None => errors.push(format!("Missing header: {}", header.name)),
            Some(actual) => {
                if !actual
                    .to_lowercase()
                    .contains(&header.contains.to_lowercase())
                {
                    errors.push(format!(
                        "Header mismatch: {} does not contain '{}' (actual '{}')",
                        header.name,
                        header.contains,
                        truncate_with_ellipsis(actual, MAX_DIAGNOSTIC_CHARS)
                    ));
                }
            }
        }
    }

    let max_redirects = check.max_redirects();
    if is_redirect_status(fetched.status) && fetched.redirect_count >= max_redirects {
        errors.push(format!("Redirect budget exceeded (max {max_redirects})"));
    }

    if let Some(bounds) = &check.content_length {
        let len = fetched.body.len();
        if let Some(min) = bounds.min_bytes {
            if len < min {
                errors.push(format!("Content too short: {len} bytes (min {min})"));
            }
        }
        if let Some(max) = bounds.max_bytes {
            if len > max {
                errors.push(format!("Content too large: {len} bytes (max {max})"));
            }
        }
    }

    if let Some(rule) = &check.content_rule {
        if let Err(reason) = content::evaluate(rule, &fetched.text()) {
            errors.push(reason);
        }
    }

    errors
}
