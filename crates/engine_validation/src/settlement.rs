//! Settlement-instruction free-text rules.

use regex::Regex;
use std::sync::LazyLock;

/// Characters allowed in settlement text: letters, digits, space, common
/// punctuation, line breaks, and backslash-escaped quotes.
static ALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:\\["']|[\p{L}\p{N} ,.:/()\-\r\n])+$"#).expect("allow-list pattern")
});

/// Checks optional settlement-instruction text.
///
/// Absence is fine; supplied text is trimmed and must be 10-500
/// characters, free of semicolons and unescaped quotes, and restricted to
/// the allow-list. The checks run in order and report the first violation:
/// a text that fails the length rule is not also scanned for injection.
///
/// # Examples
///
/// ```
/// use engine_validation::validate_settlement_text;
///
/// assert!(validate_settlement_text(None).is_empty());
/// assert!(!validate_settlement_text(Some("Short")).is_empty());
/// assert!(validate_settlement_text(Some("Pay agent: Citi London, ref 42")).is_empty());
/// ```
pub fn validate_settlement_text(text: Option<&str>) -> Vec<String> {
    let Some(raw) = text else {
        return vec![];
    };
    let text = raw.trim();
    if text.is_empty() {
        return vec![];
    }

    if text.chars().count() < 10 || text.chars().count() > 500 {
        return vec![
            "Settlement instructions must be between 10 and 500 characters.".to_string(),
        ];
    }

    if text.contains(';') {
        return vec!["Semicolons are not allowed in settlement instructions.".to_string()];
    }

    if has_unescaped_quote(text) {
        return vec![
            "Unescaped quote found. Escape quotes with a backslash (\\\" for double quotes)."
                .to_string(),
        ];
    }

    if !ALLOWED.is_match(text) {
        return vec![
            "Settlement instructions contain unsupported characters.".to_string(),
        ];
    }

    vec![]
}

/// A quote is unescaped unless the immediately preceding character is a
/// backslash.
fn has_unescaped_quote(text: &str) -> bool {
    let mut prev = None;
    for c in text.chars() {
        if (c == '"' || c == '\'') && prev != Some('\\') {
            return true;
        }
        prev = Some(c);
    }
    false
}
