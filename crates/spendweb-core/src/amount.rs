//! Amount field parsing.
//!
//! One function decides both whether a keystroke may be stored and whether
//! the stored text is a submittable amount.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("amount pattern is valid"));

/// A syntactically acceptable amount field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    /// Nothing typed yet
    Empty,
    /// Allowed text with no numeric value yet, e.g. "."
    Incomplete,
    /// Text with a numeric value (which may still be zero)
    Value(Decimal),
}

/// Text that may never be stored in the amount field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedAmount;

/// Classify raw amount text.
///
/// Accepts an optional integer part, an optional single `.` and optional
/// fractional digits; anything else is [`MalformedAmount`].
pub fn parse_amount(raw: &str) -> Result<AmountInput, MalformedAmount> {
    if raw.is_empty() {
        return Ok(AmountInput::Empty);
    }
    if !AMOUNT_PATTERN.is_match(raw) {
        return Err(MalformedAmount);
    }

    let trimmed = raw.strip_suffix('.').unwrap_or(raw);
    if trimmed.is_empty() {
        return Ok(AmountInput::Incomplete);
    }
    let normalized = if trimmed.starts_with('.') {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    };

    // Digit strings beyond Decimal's range are allowed text but not a number
    Ok(Decimal::from_str(&normalized)
        .map(AmountInput::Value)
        .unwrap_or(AmountInput::Incomplete))
}

/// Whether `candidate` may replace the current field value
pub fn accepts(candidate: &str) -> bool {
    parse_amount(candidate).is_ok()
}

/// The submittable amount: present, numeric and greater than zero
pub fn positive_amount(raw: &str) -> Option<Decimal> {
    match parse_amount(raw) {
        Ok(AmountInput::Value(value)) if value > Decimal::ZERO => Some(value),
        _ => None,
    }
}
