use crate::core::text::normalize;
use crate::domain::model::{Price, Role};
use crate::utils::error::{MensaError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

/// Added to the student price for employees and guests.
pub const GUEST_SURCHARGE: Decimal = Decimal::from_parts(160, 0, 0, false, 2);

fn plain_price() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+),([0-9]+)[^0-9]*$").expect("price pattern is valid"))
}

fn labeled_price() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]*):? *([0-9]+),([0-9]+) [^ ].*$").expect("price pattern is valid")
    })
}

/// `"2,30 €"` → `"2.30"`. Digit counts are kept as they are.
pub fn normalize_price(raw: &str) -> Result<String> {
    let s = normalize(raw);
    let caps = plain_price()
        .captures(&s)
        .ok_or_else(|| MensaError::format("price", s.as_str()))?;
    Ok(format!("{}.{}", &caps[1], &caps[2]))
}

/// Amounts that do not fit a 96-bit mantissa with scale <= 28 are rejected,
/// never rounded.
pub fn parse_amount(normalized: &str) -> Result<Decimal> {
    Decimal::from_str_exact(normalized).map_err(|_| MensaError::format("price", normalized))
}

/// `student + 1.60`. Fails instead of rounding when the sum needs more
/// digits than a `Decimal` holds.
pub fn add_surcharge(student: Decimal) -> Result<Decimal> {
    let exact_scale = student.scale().max(GUEST_SURCHARGE.scale());
    student
        .checked_add(GUEST_SURCHARGE)
        .filter(|sum| sum.scale() >= exact_scale)
        .ok_or_else(|| MensaError::format("price", student.to_string()))
}

/// Employee/guest price for a normalized student price, exact.
pub fn guest_price(normalized: &str) -> Result<String> {
    Ok(add_surcharge(parse_amount(normalized)?)?.to_string())
}

/// Unknown labels fall back to [`Role::Other`].
pub fn role_for_label(label: &str) -> Role {
    match label {
        "Studierende" => Role::Student,
        "Bedienstete" => Role::Employee,
        "Gast" => Role::Other,
        _ => Role::Other,
    }
}

/// `"Studierende: 2,30 €"` → student 2.30.
pub fn parse_labeled_price(raw: &str) -> Result<Price> {
    let s = normalize(raw);
    let caps = labeled_price()
        .captures(&s)
        .ok_or_else(|| MensaError::format("price", s.as_str()))?;
    let amount = parse_amount(&format!("{}.{}", &caps[2], &caps[3]))?;
    Ok(Price {
        role: role_for_label(&caps[1]),
        amount,
    })
}

/// Keeps the first price per role, sorts by role, and derives employee and
/// other from a lone student price.
pub fn complete_prices(mut prices: Vec<Price>) -> Result<Vec<Price>> {
    let mut seen = Vec::with_capacity(3);
    prices.retain(|p| {
        if seen.contains(&p.role) {
            false
        } else {
            seen.push(p.role);
            true
        }
    });

    if let [Price {
        role: Role::Student,
        amount,
    }] = prices.as_slice()
    {
        let guest = add_surcharge(*amount)?;
        prices.push(Price {
            role: Role::Employee,
            amount: guest,
        });
        prices.push(Price {
            role: Role::Other,
            amount: guest,
        });
    }

    prices.sort_by_key(|p| p.role);
    Ok(prices)
}
