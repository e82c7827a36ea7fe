//! Quantity lexing and display formatting
//!
//! Converts numeric ingredient tokens (integers, decimals, fractions,
//! mixed numbers) to floating values and back to culinary display strings.

use thiserror::Error;

/// Quantity assumed when a token cannot be read as a number
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Display table for common culinary fractions, keyed by the quantity
/// rounded to two decimal places
///
/// The recognized set is deliberately small; callers with other display
/// conventions pass their own table to [`format_quantity_with`].
pub const DEFAULT_FRACTIONS: &[(f64, &str)] = &[
    (0.25, "1/4"),
    (0.33, "1/3"),
    (0.5, "1/2"),
    (0.67, "2/3"),
    (0.75, "3/4"),
    (1.25, "1 1/4"),
    (1.33, "1 1/3"),
    (1.5, "1 1/2"),
    (1.67, "1 2/3"),
    (1.75, "1 3/4"),
    (2.25, "2 1/4"),
    (2.33, "2 1/3"),
    (2.5, "2 1/2"),
    (2.67, "2 2/3"),
    (2.75, "2 3/4"),
    (3.25, "3 1/4"),
    (3.33, "3 1/3"),
    (3.5, "3 1/2"),
];

/// Quantity token errors
#[derive(Debug, Error, PartialEq)]
pub enum QuantityError {
    #[error("fraction has a zero denominator: {0}")]
    ZeroDenominator(String),

    #[error("unrecognized quantity token: {0}")]
    Unrecognized(String),
}

/// Parse a quantity token, rejecting malformed input with a typed error
///
/// Tries, in order: mixed number ("1 1/2"), simple fraction ("3/4"),
/// plain decimal ("2", "0.5").
pub fn parse_quantity_strict(token: &str) -> Result<f64, QuantityError> {
    let trimmed = token.trim();

    if let Some(value) = parse_mixed_number(trimmed)? {
        return Ok(value);
    }
    if let Some(value) = parse_fraction(trimmed)? {
        return Ok(value);
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Ok(value);
    }

    Err(QuantityError::Unrecognized(trimmed.to_string()))
}

/// Parse a quantity token, defaulting to 1 when it cannot be read
///
/// The lenient entry point used by the extractor. Zero denominators and
/// unrecognized tokens both fall back to [`DEFAULT_QUANTITY`]; nothing
/// on this path panics or divides by zero.
pub fn parse_quantity(token: &str) -> f64 {
    parse_quantity_strict(token).unwrap_or(DEFAULT_QUANTITY)
}

/// Try "<whole> <num>/<den>" (e.g. "1 1/2")
fn parse_mixed_number(token: &str) -> Result<Option<f64>, QuantityError> {
    let mut parts = token.split_whitespace();
    let (Some(whole), Some(frac), None) = (parts.next(), parts.next(), parts.next()) else {
        return Ok(None);
    };
    let Ok(whole) = whole.parse::<u64>() else {
        return Ok(None);
    };
    match parse_fraction(frac)? {
        Some(frac) => Ok(Some(whole as f64 + frac)),
        None => Ok(None),
    }
}

/// Try "<num>/<den>" (e.g. "3/4")
fn parse_fraction(token: &str) -> Result<Option<f64>, QuantityError> {
    let Some((num, den)) = token.split_once('/') else {
        return Ok(None);
    };
    let (Ok(num), Ok(den)) = (num.trim().parse::<u64>(), den.trim().parse::<u64>()) else {
        return Ok(None);
    };
    if den == 0 {
        return Err(QuantityError::ZeroDenominator(token.to_string()));
    }
    Ok(Some(num as f64 / den as f64))
}

/// Round to two decimal places
pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a quantity for display using [`DEFAULT_FRACTIONS`]
pub fn format_quantity(value: f64) -> String {
    format_quantity_with(value, DEFAULT_FRACTIONS)
}

/// Format a quantity for display
///
/// Integral values render as plain integers. Everything else is rounded
/// to two decimal places and matched exactly against `fractions` (no
/// nearest-neighbor search); unmatched values render as a decimal with
/// trailing zeros trimmed.
pub fn format_quantity_with(value: f64, fractions: &[(f64, &str)]) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        return format!("{}", value.round() as i64);
    }

    let rounded = round_hundredths(value);
    if let Some((_, text)) = fractions
        .iter()
        .find(|(key, _)| (key - rounded).abs() < f64::EPSILON)
    {
        return (*text).to_string();
    }

    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
