//! Post-primary evaluation: latency and certificate-expiry triggers.

use crate::check::models::CheckResult;
use crate::config::{CheckConfig, LatencyMode, TlsThresholds};

/// Applies the latency threshold, if any, according to the check's mode.
pub(crate) fn apply_latency(check: &CheckConfig, result: &mut CheckResult) {
    let (Some(max), Some(got)) = (check.max_latency_ms, result.latency_ms) else {
        return;
    };
    if got <= max {
        return;
    }

    match check.latency_mode() {
        LatencyMode::Ignore => {
            result.slow_triggered = false;
        }
        LatencyMode::Warn => {
            result.slow_triggered = true;
            result.warning_only = true;
        }
        LatencyMode::Fail => {
            result.slow_triggered = true;
            result.fail_with(format!("Slow response: {got}ms > {max}ms"));
        }
    }
}

/// Applies certificate thresholds to a measured day count.
///
/// The warn threshold only raises the trigger; the min threshold also fails
/// the verdict, even one that passed every HTTP validation.
pub(crate) fn apply_cert_days(thresholds: &TlsThresholds, days: i64, result: &mut CheckResult) {
    result.cert_days_remaining = Some(days);

    if let Some(warn) = thresholds.warn_days_remaining {
        if days <= warn {
            result.cert_expiring_triggered = true;
        }
    }

    if let Some(min) = thresholds.min_days_remaining {
        if days <= min {
            result.fail_with(format!(
                "TLS certificate too close to expiry: {days} days remaining (min {min})"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(max_latency_ms: Option<u64>, mode: Option<LatencyMode>) -> CheckConfig {
        CheckConfig {
            id: "api".to_string(),
            name: "API".to_string(),
            url: "https://api.example.com/".to_string(),
            max_latency_ms,
            latency_mode: mode,
            ..Default::default()
        }
    }

    fn passing(check: &CheckConfig, latency_ms: u64) -> CheckResult {
        let mut r = CheckResult::new(check);
        r.latency_ms = Some(latency_ms);
        r.settle(Vec::new());
        r
    }

    #[test]
    fn test_warn_mode_keeps_success() {
        let c = check(Some(1000), Some(LatencyMode::Warn));
        let mut r = passing(&c, 1500);
        apply_latency(&c, &mut r);
        assert!(r.success);
        assert!(r.warning_only);
        assert!(r.slow_triggered);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_fail_mode_is_default() {
        let c = check(Some(1000), None);
        let mut r = passing(&c, 1500);
        apply_latency(&c, &mut r);
        assert!(!r.success);
        assert!(r.slow_triggered);
        assert!(!r.warning_only);
        assert_eq!(r.error.as_deref(), Some("Slow response: 1500ms > 1000ms"));
    }

    #[test]
    fn test_ignore_mode_clears_trigger() {
        let c = check(Some(1000), Some(LatencyMode::Ignore));
        let mut r = passing(&c, 5000);
        apply_latency(&c, &mut r);
        assert!(r.success);
        assert!(!r.slow_triggered);
        assert!(!r.warning_only);
    }

    #[test]
    fn test_latency_at_threshold_is_fine() {
        let c = check(Some(1000), Some(LatencyMode::Fail));
        let mut r = passing(&c, 1000);
        apply_latency(&c, &mut r);
        assert!(r.success);
        assert!(!r.slow_triggered);
    }

    #[test]
    fn test_no_threshold_no_trigger() {
        let c = check(None, Some(LatencyMode::Fail));
        let mut r = passing(&c, 60_000);
        apply_latency(&c, &mut r);
        assert!(r.success);
        assert!(!r.slow_triggered);
    }

    #[test]
    fn test_cert_below_min_fails_passing_check() {
        let c = check(None, None);
        let mut r = passing(&c, 100);
        let thresholds = TlsThresholds {
            warn_days_remaining: Some(30),
            min_days_remaining: Some(7),
        };
        apply_cert_days(&thresholds, 5, &mut r);
        assert!(r.cert_expiring_triggered);
        assert!(!r.success);
        assert_eq!(r.cert_days_remaining, Some(5));
        assert!(r
            .error
            .as_deref()
            .unwrap()
            .contains("certificate too close to expiry"));
    }

    #[test]
    fn test_cert_in_warn_window_only_triggers() {
        let c = check(None, None);
        let mut r = passing(&c, 100);
        let thresholds = TlsThresholds {
            warn_days_remaining: Some(30),
            min_days_remaining: Some(7),
        };
        apply_cert_days(&thresholds, 20, &mut r);
        assert!(r.cert_expiring_triggered);
        assert!(r.success);
    }

    #[test]
    fn test_cert_far_from_expiry() {
        let c = check(None, None);
        let mut r = passing(&c, 100);
        let thresholds = TlsThresholds {
            warn_days_remaining: Some(30),
            min_days_remaining: Some(7),
        };
        apply_cert_days(&thresholds, 90, &mut r);
        assert!(!r.cert_expiring_triggered);
        assert!(r.success);
        assert_eq!(r.cert_days_remaining, Some(90));
    }
}
