//! Verdict produced by evaluating one check once.

use crate::config::{CheckConfig, HttpMethod, Severity, ERROR_SEPARATOR};
use crate::fetch::FetchResult;
use crate::utils::sanitize_error_message;

/// Outcome of one check in one run.
///
/// `success == false` always comes with a non-empty `error`. Multiple causes
/// are joined with `" | "`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub check_id: String,
    pub check_name: String,
    pub url: String,
    pub method: HttpMethod,
    pub severity: Severity,

    pub success: bool,
    /// Slow but within a `Warn` latency mode: alert without failing
    pub warning_only: bool,

    pub status_code: Option<u16>,
    pub latency_ms: Option<u64>,
    pub response_bytes: Option<u64>,
    pub redirect_count: u32,
    pub cert_days_remaining: Option<i64>,
    pub error: Option<String>,

    pub slow_triggered: bool,
    pub cert_expiring_triggered: bool,
}

impl CheckResult {
    /// Blank verdict for `check`, not yet successful.
    pub fn new(check: &CheckConfig) -> Self {
        Self {
            check_id: check.id.clone(),
            check_name: check.name.clone(),
            url: check.url.clone(),
            method: check.method,
            severity: check.severity,
            success: false,
            warning_only: false,
            status_code: None,
            latency_ms: None,
            response_bytes: None,
            redirect_count: 0,
            cert_days_remaining: None,
            error: None,
            slow_triggered: false,
            cert_expiring_triggered: false,
        }
    }

    /// Takes status, latency, size and redirects from a probe step.
    pub(crate) fn record_step(&mut self, fetched: &FetchResult) {
        self.status_code = Some(fetched.status);
        self.latency_ms = Some(fetched.elapsed_ms);
        self.response_bytes = Some(fetched.body.len() as u64);
        self.redirect_count += fetched.redirect_count;
    }

    /// Sets the verdict from the accumulated validation failures.
    pub(crate) fn settle(&mut self, errors: Vec<String>) {
        if errors.is_empty() {
            self.success = true;
            self.error = None;
        } else {
            self.success = false;
            self.error = Some(sanitize_error_message(&errors.join(ERROR_SEPARATOR)));
        }
    }

    /// Fails the verdict with an extra cause, keeping earlier causes.
    pub(crate) fn fail_with(&mut self, cause: impl AsRef<str>) {
        self.success = false;
        let cause = sanitize_error_message(cause.as_ref());
        self.error = Some(match self.error.take().filter(|e| !e.trim().is_empty()) {
            Some(existing) => format!("{existing}{ERROR_SEPARATOR}{cause}"),
            None => cause,
        });
    }

    /// Fails the verdict outright; the cause replaces any partial diagnostics.
    pub(crate) fn abort(&mut self, cause: impl AsRef<str>) {
        self.success = false;
        self.error = Some(sanitize_error_message(cause.as_ref()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check() -> CheckConfig {
        CheckConfig {
            id: "home".to_string(),
            name: "Homepage".to_string(),
            url: "https://example.com/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_result_copies_identity() {
        let r = CheckResult::new(&check());
        assert_eq!(r.check_id, "home");
        assert_eq!(r.severity, Severity::Critical);
        assert!(!r.success);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_settle_joins_errors() {
        let mut r = CheckResult::new(&check());
        r.settle(vec!["a".to_string(), "b".to_string()]);
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("a | b"));
    }

    #[test]
    fn test_settle_success_clears_error() {
        let mut r = CheckResult::new(&check());
        r.settle(Vec::new());
        assert!(r.success);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_fail_with_appends() {
        let mut r = CheckResult::new(&check());
        r.settle(vec!["Status out of range: 500 (expected 200-299)".to_string()]);
        r.fail_with("Slow response: 1500ms > 1000ms");
        assert_eq!(
            r.error.as_deref(),
            Some("Status out of range: 500 (expected 200-299) | Slow response: 1500ms > 1000ms")
        );
    }

    #[test]
    fn test_fail_with_on_success_starts_fresh() {
        let mut r = CheckResult::new(&check());
        r.settle(Vec::new());
        r.fail_with("only cause");
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("only cause"));
    }

    #[test]
    fn test_abort_replaces_and_sanitizes() {
        let mut r = CheckResult::new(&check());
        r.settle(vec!["earlier".to_string()]);
        r.abort("TimeoutError: deadline\x07 exceeded");
        assert_eq!(r.error.as_deref(), Some("TimeoutError: deadline exceeded"));
    }
}
