//! Content rules: substring or regex markers evaluated against a decoded body.
//!
//! Evaluation is pure: the same rule and text always produce the same outcome
//! and message. Failure messages echo the expected value (truncated), never
//! the response body.

use fancy_regex::Regex;

use crate::config::{ContentRule, ContentRuleKind, MAX_DIAGNOSTIC_CHARS};
use crate::utils::truncate_with_ellipsis;

/// Evaluates `rule` against `text`, returning the failure reason on mismatch.
///
/// - `contains`: byte-exact substring search
/// - `regex`: unanchored match anywhere in `text`, look-around and
///   backreferences included; an invalid pattern is its own failure, distinct
///   from a missing marker, and so is a match that exceeds the backtrack limit
pub fn evaluate(rule: &ContentRule, text: &str) -> Result<(), String> {
    let expected = truncate_with_ellipsis(&rule.value, MAX_DIAGNOSTIC_CHARS);
    match rule.kind {
        ContentRuleKind::Contains => {
            if text.contains(rule.value.as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Content missing expected marker (contains): {expected}"
                ))
            }
        }
        ContentRuleKind::Regex => {
            let re = Regex::new(&rule.value).map_err(|e| format!("Invalid regex: {e}"))?;
            let matched = re
                .is_match(text)
                .map_err(|e| format!("Regex evaluation failed: {e}"))?;
            if matched {
                Ok(())
            } else {
                Err(format!("Content missing expected marker (regex): {expected}"))
            }
        }
    }
}
