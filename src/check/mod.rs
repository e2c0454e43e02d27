//! Check execution: turns a check definition into exactly one verdict.
//!
//! Flow per check:
//! 1. Simple flow (one probe) or login flow (seed GET, POST, optional GET)
//! 2. Validation failures are accumulated into the verdict
//! 3. Latency trigger, then TLS certificate trigger
//!
//! Anything that aborts evaluation (transport error, bad URL, even a panic)
//! is folded into a failed verdict. [`execute_check`] never returns an error.

mod login;
mod models;
mod simple;
mod triggers;

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use log::warn;
use url::Url;

use crate::config::CheckConfig;
use crate::error_handling::{describe_check_error, CheckError, ErrorType};
use crate::tls::{probe_certificate, CertProbeOutcome};

pub use models::CheckResult;

/// Evaluates `check` once.
pub async fn execute_check(check: &CheckConfig) -> CheckResult {
    let mut result = CheckResult::new(check);
    let outcome = AssertUnwindSafe(evaluate(check, &mut result))
        .catch_unwind()
        .await;
    contain(&mut result, outcome);
    result
}

type Outcome = Result<Result<(), CheckError>, Box<dyn Any + Send>>;

fn contain(result: &mut CheckResult, outcome: Outcome) {
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => result.abort(describe_check_error(&e)),
        Err(panic) => result.abort(format!(
            "{}: {}",
            ErrorType::ProbePanic,
            panic_message(&*panic)
        )),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "check evaluation panicked"
    }
}

async fn evaluate(check: &CheckConfig, result: &mut CheckResult) -> Result<(), CheckError> {
    let errors = match &check.login {
        Some(login) => login::run(check, login, result).await?,
        None => simple::run(check, result).await?,
    };
    result.settle(errors);

    triggers::apply_latency(check, result);
    apply_tls(check, result).await;

    Ok(())
}

/// Probes the certificate when TLS thresholds are configured and applies them.
async fn apply_tls(check: &CheckConfig, result: &mut CheckResult) {
    let Some(thresholds) = &check.tls else {
        return;
    };
    match probe_tls(check).await {
        Some(days) => triggers::apply_cert_days(thresholds, days, result),
        None => result.cert_days_remaining = None,
    }
}

/// Days remaining on the target's certificate; `None` when not applicable or
/// when the probe itself failed (logged, never part of the verdict).
async fn probe_tls(check: &CheckConfig) -> Option<i64> {
    let url = Url::parse(&check.url).ok()?;
    match probe_certificate(&url, check.timeout()).await {
        Ok(CertProbeOutcome::DaysRemaining(days)) => Some(days),
        Ok(CertProbeOutcome::NotApplicable) => None,
        Ok(CertProbeOutcome::NoCertificate) => {
            warn!("Check {}: no TLS certificate presented", check.id);
            None
        }
        Err(e) => {
            warn!("Check {}: TLS probe failed: {e}", check.id);
            None
        }
    }
}
