//! Day headings to ISO dates.
//!
//! Three heading shapes occur in the wild and share one grammar:
//!
//! - `Montag, 03. November` (month name, year taken from the reference)
//! - `Montag, 03. November 2015` / `Montag 03.11.2015` (year in the text)
//! - `Di, 05.11.` / `Di., 05.` (numeric month)

use crate::core::text::normalize;
use crate::utils::error::{MensaError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

fn heading_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^0-9]*?(?:([0-9]{1,2})\.\s*)?([0-9]{1,2}\.|[^\s0-9.,]+)(?:\s*([0-9]{4}))?$")
            .expect("heading pattern is valid")
    })
}

/// Resolves a month token: either `"11."` or a German month name.
pub fn month_number(token: &str) -> Result<u32> {
    if let Some(digits) = token.strip_suffix('.') {
        return digits
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| MensaError::format("month", token));
    }
    if token == "Maerz" {
        return Ok(3);
    }
    MONTHS
        .iter()
        .position(|m| *m == token)
        .map(|i| i as u32 + 1)
        .ok_or_else(|| MensaError::format("month", token))
}

/// Parses a day heading into `yyyy-mm-dd`. A year in the heading wins over
/// `reference_year`.
pub fn parse_date(heading: &str, reference_year: i32) -> Result<String> {
    let s = normalize(heading);
    let caps = heading_pattern()
        .captures(&s)
        .ok_or_else(|| MensaError::format("date", s.as_str()))?;

    let month_token = &caps[2];

    // "Di., 05." carries a single numeric token; it names the day as well
    let day: u32 = match caps.get(1) {
        Some(d) => d.as_str().parse::<u32>(),
        None if month_token.ends_with('.') => month_token.trim_end_matches('.').parse::<u32>(),
        None => return Err(MensaError::format("date", s.as_str())),
    }
    .map_err(|_| MensaError::format("date", s.as_str()))?;
    let month = month_number(month_token)?;

    let year = match caps.get(3) {
        Some(y) => y
            .as_str()
            .parse::<i32>()
            .map_err(|_| MensaError::format("date", s.as_str()))?,
        None => reference_year,
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| MensaError::format("date", s.as_str()))?;
    tracing::trace!("heading {:?} -> {}", s, date);
    Ok(date.format("%Y-%m-%d").to_string())
}
