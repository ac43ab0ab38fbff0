use crate::core::text::{normalize, truncate_chars};
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_NOTE_CHARS: usize = 250;

struct NotePatterns {
    codes: Regex,
    leading_comma: Regex,
    plenk: Regex,
}

fn patterns() -> &'static NotePatterns {
    static PATTERNS: OnceLock<NotePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| NotePatterns {
        codes: Regex::new(r"\([^)]+\)").expect("code pattern is valid"),
        leading_comma: Regex::new(r"^ *,").expect("comma pattern is valid"),
        plenk: Regex::new(r" +,").expect("plenk pattern is valid"),
    })
}

/// First non-empty fragment of a name column.
pub fn meal_name(fragments: &[String]) -> Option<String> {
    fragments.iter().map(|f| normalize(f)).find(|s| !s.is_empty())
}

/// Everything after the meal name, with additive codes like `(A,C,G)`
/// removed, comma spacing repaired and the result capped at 250 chars.
pub fn long_note(fragments: &[String]) -> Option<String> {
    let rest: Vec<String> = fragments
        .iter()
        .map(|f| normalize(f))
        .filter(|s| !s.is_empty())
        .skip(1)
        .collect();
    if rest.is_empty() {
        return None;
    }

    let p = patterns();
    let joined = rest.join(" ");
    let stripped = p.codes.replace_all(&joined, "");
    let stripped = p.leading_comma.replace(&stripped, "");
    let stripped = p.plenk.replace_all(&stripped, ", ");
    let note = truncate_chars(&normalize(&stripped), MAX_NOTE_CHARS);

    if note.is_empty() {
        None
    } else {
        Some(note)
    }
}
