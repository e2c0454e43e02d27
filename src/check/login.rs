//! Authenticated flow: cookie-seeding GET, form POST, optional post-login GET.
//!
//! All steps share one cookie jar. The login POST provides the initial
//! status, latency and size; a post-login page overwrites status and size,
//! adds its latency, and becomes the page of record.

use log::debug;
use reqwest::Method;

use crate::check::models::CheckResult;
use crate::config::{CheckConfig, LoginConfig};
use crate::content;
use crate::error_handling::CheckError;
use crate::fetch::{fetch, FetchRequest};
use crate::initialization::init_probe_client;

fn get(url: &str, max_redirects: u32, max_body_bytes: usize) -> FetchRequest<'_> {
    FetchRequest {
        method: Method::GET,
        url,
        form: None,
        max_redirects,
        max_body_bytes,
    }
}

pub(super) async fn run(
    check: &CheckConfig,
    login: &LoginConfig,
    result: &mut CheckResult,
) -> Result<Vec<String>, CheckError> {
    let client = init_probe_client(check.timeout(), true)?;
    let max_redirects = check.max_redirects();
    let max_body_bytes = check.max_body_bytes();

    if !check.url.trim().is_empty() {
        let seed = fetch(&client, get(&check.url, max_redirects, max_body_bytes)).await?;
        debug!(
            "Check {}: cookie-seeding GET returned {}",
            check.id, seed.status
        );
        result.redirect_count += seed.redirect_count;
    }

    let fields = login.form_fields();
    let post = fetch(
        &client,
        FetchRequest {
            method: Method::POST,
            url: &login.login_url,
            form: Some(&fields),
            max_redirects,
            max_body_bytes,
        },
    )
    .await?;
    result.record_step(&post);

    let mut errors = Vec::new();
    let expected = check.expected_status;
    if !expected.contains(post.status) {
        errors.push(format!(
            "Login POST status out of range: {} (expected {}-{})",
            post.status, expected.min, expected.max
        ));
    }

    if let Some(indicator) = &login.success_indicator {
        if let Err(reason) = content::evaluate(indicator, &post.text()) {
            errors.push(format!("Login success indicator failed: {reason}"));
        }
    }

    if let Some(url) = login.post_login_url() {
        let after = fetch(&client, get(url, max_redirects, max_body_bytes)).await?;

        let login_latency = result.latency_ms.unwrap_or(0);
        result.status_code = Some(after.status);
        result.latency_ms = Some(login_latency + after.elapsed_ms);
        result.redirect_count += after.redirect_count;
        result.response_bytes = Some(after.body.len() as u64);

        if !(200..=399).contains(&after.status) {
            errors.push(format!("Post-login GET unexpected status: {}", after.status));
        }

        if let Some(rule) = &login.post_login_rule {
            if let Err(reason) = content::evaluate(rule, &after.text()) {
                errors.push(format!("Post-login rule failed: {reason}"));
            }
        }
    }

    Ok(errors)
}
