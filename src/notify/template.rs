//! `{{Key}}` substitution for alert subjects and bodies.

use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replaces every `{{Key}}` in `template` with `vars[Key]`.
///
/// - The key is trimmed, so `{{ CheckId }}` works
/// - Unknown keys render as the empty string
/// - An unterminated `{{` is copied through literally
/// - Substituted values are not expanded again
pub fn render(template: &str, vars: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };

        out.push_str(&rest[..start]);
        let key = after_open[..end].trim();
        if let Some(value) = vars.get(key) {
            out.push_str(value);
        }
        rest = &after_open[end + CLOSE.len()..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_known_keys() {
        let v = vars(&[("CheckName", "Homepage"), ("StatusCode", "503")]);
        assert_eq!(
            render("[FAIL] {{CheckName}} returned {{StatusCode}}", &v),
            "[FAIL] Homepage returned 503"
        );
    }

    #[test]
    fn test_key_is_trimmed() {
        let v = vars(&[("CheckId", "home")]);
        assert_eq!(render("id={{ CheckId }}", &v), "id=home");
    }

    #[test]
    fn test_unknown_key_renders_empty() {
        assert_eq!(render("a{{Nope}}b", &BTreeMap::new()), "ab");
    }

    #[test]
    fn test_unterminated_open_is_literal() {
        let v = vars(&[("A", "1")]);
        assert_eq!(render("{{A}} and {{B", &v), "1 and {{B");
    }

    #[test]
    fn test_non_greedy_match() {
        let v = vars(&[("A", "1"), ("B", "2")]);
        assert_eq!(render("{{A}}{{B}}", &v), "12");
    }

    #[test]
    fn test_no_recursive_expansion() {
        let v = vars(&[("A", "{{B}}"), ("B", "x")]);
        assert_eq!(render("{{A}}", &v), "{{B}}");
    }

    #[test]
    fn test_single_braces_untouched() {
        let v = vars(&[("Body", "down")]);
        assert_eq!(
            render("{ \"message\": \"{{Body}}\" }", &v),
            "{ \"message\": \"down\" }"
        );
    }
}
