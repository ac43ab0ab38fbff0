use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\r\n]+").expect("whitespace pattern is valid"))
}

/// Collapses every run of spaces, tabs and line breaks into one space and
/// trims the result.
pub fn normalize(s: &str) -> String {
    whitespace_run().replace_all(s, " ").trim().to_string()
}

/// Truncates to at most `max` characters without splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
