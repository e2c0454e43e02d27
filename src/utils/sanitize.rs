//! Utilities for sanitizing and truncating diagnostic text.
//!
//! Verdict errors end up in SQLite and in alert bodies, so they are stripped
//! of control characters. Configured values echoed back in diagnostics are
//! truncated so a long pattern never floods an alert.

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) are
/// removed; everything else, including non-ASCII text, is kept.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .collect()
}

/// Truncates `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_error_message_removes_control_chars() {
        let input = "Error\x00message\x01with\x02control\x03chars";
        let output = sanitize_error_message(input);
        assert_eq!(output, "Errormessagewithcontrolchars");
    }

    #[test]
    fn test_sanitize_error_message_preserves_newlines_and_tabs() {
        let input = "Error\nmessage\twith\r\nwhitespace";
        assert_eq!(sanitize_error_message(input), input);
    }

    #[test]
    fn test_sanitize_error_message_preserves_unicode() {
        let input = "Error message with unicode: 测试 🚀";
        assert_eq!(sanitize_error_message(input), input);
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("marker", 120), "marker");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        let text = "a".repeat(120);
        assert_eq!(truncate_with_ellipsis(&text, 120), text);
    }

    #[test]
    fn test_truncate_long_text_gets_ellipsis() {
        let text = "b".repeat(121);
        let out = truncate_with_ellipsis(&text, 120);
        assert_eq!(out.len(), 123);
        assert!(out.ends_with("b..."));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(truncate_with_ellipsis(&text, 3), "ééé...");
    }
}
