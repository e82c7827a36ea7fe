//! Ingredient line extraction
//!
//! Applies an ordered list of whole-string shape matchers to a raw
//! ingredient line, producing a structured quantity/unit/name record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::quantity::{parse_quantity, DEFAULT_QUANTITY};
use super::units::{categorize_unit, UnitCategory, DEFAULT_UNIT};

/// A structured ingredient parsed from free-form text
///
/// Immutable once produced; every operation on it returns a fresh record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Parsed quantity (non-negative by convention)
    pub quantity: f64,
    /// Canonical lowercase unit token ("piece" when none was found)
    pub unit: String,
    /// Ingredient name; falls back to the raw input, never empty for
    /// non-empty input
    pub name: String,
    /// Verbatim input text
    pub original: String,
    /// Non-fatal diagnostic when the line did not parse cleanly
    pub error: Option<String>,
}

/// Raw captures from a shape matcher, before quantity lexing
struct Extraction {
    quantity: String,
    unit: String,
    name: String,
}

/// Shape matchers in fixed priority order; the first whole-string match
/// wins
const MATCHERS: &[fn(&str) -> Option<Extraction>] = &[
    match_qty_unit_name,
    match_qty_unit_of_name,
    match_name_dash_qty,
    match_qty_rest,
];

/// Parse a free-form ingredient line into a structured record
///
/// Each matcher is tried in order against the whole trimmed line. A line
/// no matcher understands comes back as one "piece" of the raw text with
/// a non-fatal diagnostic; this function never fails.
pub fn parse_ingredient(text: &str) -> ParsedIngredient {
    let trimmed = text.trim();

    for matcher in MATCHERS {
        if let Some(extraction) = matcher(trimmed) {
            // An empty unit capture degrades the match to qty + name
            let unit = if extraction.unit.is_empty() {
                DEFAULT_UNIT.to_string()
            } else {
                extraction.unit.to_lowercase()
            };
            return ParsedIngredient {
                quantity: parse_quantity(&extraction.quantity),
                unit,
                name: extraction.name,
                original: text.to_string(),
                error: None,
            };
        }
    }

    tracing::debug!("no ingredient shape matched: {:?}", trimmed);
    ParsedIngredient {
        quantity: DEFAULT_QUANTITY,
        unit: DEFAULT_UNIT.to_string(),
        name: trimmed.to_string(),
        original: text.to_string(),
        error: Some("Could not parse ingredient details".to_string()),
    }
}

/// Parse an ingredient entry that may not even be a string
///
/// Ingredient lists scraped from recipe JSON sometimes carry numbers or
/// objects in ingredient position; those become fallback records instead
/// of failures.
pub fn parse_ingredient_value(value: &Value) -> ParsedIngredient {
    match value {
        Value::String(text) => parse_ingredient(text),
        other => ParsedIngredient {
            quantity: DEFAULT_QUANTITY,
            unit: DEFAULT_UNIT.to_string(),
            name: other.to_string(),
            original: other.to_string(),
            error: Some("Invalid ingredient format".to_string()),
        },
    }
}

// ============================================================================
// Shape Matchers
// ============================================================================

/// "<qty> <unit...> <name>"
fn match_qty_unit_name(text: &str) -> Option<Extraction> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (quantity, qty_words) = take_quantity(&words)?;
    let (unit, unit_words) = take_unit(&words[qty_words..])?;
    let rest = &words[qty_words + unit_words..];
    if rest.is_empty() || rest[0].eq_ignore_ascii_case("of") {
        return None;
    }
    Some(Extraction {
        quantity,
        unit,
        name: rest.join(" "),
    })
}

/// "<qty> <unit...> of <name>"
fn match_qty_unit_of_name(text: &str) -> Option<Extraction> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (quantity, qty_words) = take_quantity(&words)?;
    let (unit, unit_words) = take_unit(&words[qty_words..])?;
    let (connective, name) = words[qty_words + unit_words..].split_first()?;
    if !connective.eq_ignore_ascii_case("of") || name.is_empty() {
        return None;
    }
    Some(Extraction {
        quantity,
        unit,
        name: name.join(" "),
    })
}

/// "<name> - <qty> <unit>", the one shape with the name captured first
///
/// The separator is a hyphen, en-dash, or em-dash; the split is on the
/// rightmost dash whose right side starts with a quantity, so hyphenated
/// names keep their hyphen.
fn match_name_dash_qty(text: &str) -> Option<Extraction> {
    for (idx, sep) in text.char_indices().rev() {
        if !matches!(sep, '-' | '\u{2013}' | '\u{2014}') {
            continue;
        }
        let name = text[..idx].trim();
        let tail = text[idx + sep.len_utf8()..].trim();
        if name.is_empty() || tail.is_empty() {
            continue;
        }
        let words: Vec<&str> = tail.split_whitespace().collect();
        let Some((quantity, qty_words)) = take_quantity(&words) else {
            continue;
        };
        let unit = match &words[qty_words..] {
            [] => String::new(),
            [only] => (*only).to_string(),
            _ => continue,
        };
        return Some(Extraction {
            quantity,
            unit,
            name: name.to_string(),
        });
    }
    None
}

/// "<qty> <rest>" - fallback when no distinguishable unit exists
fn match_qty_rest(text: &str) -> Option<Extraction> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (quantity, qty_words) = take_quantity(&words)?;
    let rest = &words[qty_words..];
    if rest.is_empty() {
        return None;
    }
    Some(Extraction {
        quantity,
        unit: String::new(),
        name: rest.join(" "),
    })
}

// ============================================================================
// Token Helpers
// ============================================================================

/// Split off the leading quantity token(s); a mixed number ("1 1/2")
/// spans two words
fn take_quantity(words: &[&str]) -> Option<(String, usize)> {
    let first = *words.first()?;
    if !is_numeric_token(first) {
        return None;
    }
    if let Some(second) = words.get(1) {
        if is_integer_token(first) && is_fraction_token(second) {
            return Some((format!("{} {}", first, second), 2));
        }
    }
    Some((first.to_string(), 1))
}

/// Take the longest leading run (at most two words) recognized by the
/// unit tables
fn take_unit(words: &[&str]) -> Option<(String, usize)> {
    if words.len() >= 2 {
        let two = format!("{} {}", words[0], words[1]);
        if categorize_unit(&two) != UnitCategory::Unknown {
            return Some((two, 2));
        }
    }
    let first = *words.first()?;
    if categorize_unit(first) != UnitCategory::Unknown {
        return Some((first.to_string(), 1));
    }
    None
}

fn is_integer_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_fraction_token(token: &str) -> bool {
    match token.split_once('/') {
        Some((num, den)) => is_integer_token(num) && is_integer_token(den),
        None => false,
    }
}

fn is_decimal_token(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit())
        && token.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && token.bytes().filter(|&b| b == b'.').count() <= 1
}

fn is_numeric_token(token: &str) -> bool {
    is_decimal_token(token) || is_fraction_token(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qty_unit_name() {
        let parsed = parse_ingredient("2 cups flour");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, "cups");
        assert_eq!(parsed.name, "flour");
        assert_eq!(parsed.original, "2 cups flour");
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn test_mixed_number_quantity() {
        let parsed = parse_ingredient("1 1/2 cups sugar");
        assert_eq!(parsed.quantity, 1.5);
        assert_eq!(parsed.unit, "cups");
        assert_eq!(parsed.name, "sugar");
    }

    #[test]
    fn test_fraction_quantity() {
        let parsed = parse_ingredient("3/4 tsp salt");
        assert_eq!(parsed.quantity, 0.75);
        assert_eq!(parsed.unit, "tsp");
        assert_eq!(parsed.name, "salt");
    }

    #[test]
    fn test_qty_unit_of_name() {
        let parsed = parse_ingredient("3 tbsp of olive oil");
        assert_eq!(parsed.quantity, 3.0);
        assert_eq!(parsed.unit, "tbsp");
        assert_eq!(parsed.name, "olive oil");
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn test_two_word_unit() {
        let parsed = parse_ingredient("2 fl oz lime juice");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, "fl oz");
        assert_eq!(parsed.name, "lime juice");
    }

    #[test]
    fn test_name_dash_qty_unit() {
        let parsed = parse_ingredient("butter - 2 tbsp");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, "tbsp");
        assert_eq!(parsed.name, "butter");
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn test_name_dash_keeps_hyphenated_name() {
        let parsed = parse_ingredient("all-purpose flour - 2 cups");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, "cups");
        assert_eq!(parsed.name, "all-purpose flour");
    }

    #[test]
    fn test_name_en_dash_qty() {
        let parsed = parse_ingredient("heavy cream \u{2013} 1/2 cup");
        assert_eq!(parsed.quantity, 0.5);
        assert_eq!(parsed.unit, "cup");
        assert_eq!(parsed.name, "heavy cream");
    }

    #[test]
    fn test_name_dash_qty_without_unit_defaults_to_piece() {
        let parsed = parse_ingredient("lemon - 2");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, "piece");
        assert_eq!(parsed.name, "lemon");
    }

    #[test]
    fn test_qty_rest_fallback_shape() {
        let parsed = parse_ingredient("2 large eggs");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, "piece");
        assert_eq!(parsed.name, "large eggs");
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn test_single_count_line() {
        let parsed = parse_ingredient("1 egg");
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, "piece");
        assert_eq!(parsed.name, "egg");
    }

    #[test]
    fn test_unit_is_lowercased() {
        let parsed = parse_ingredient("2 CUPS Flour");
        assert_eq!(parsed.unit, "cups");
        assert_eq!(parsed.name, "Flour");
    }

    #[test]
    fn test_input_is_trimmed() {
        let parsed = parse_ingredient("   2 cups flour  ");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.name, "flour");
        assert_eq!(parsed.original, "   2 cups flour  ");
    }

    #[test]
    fn test_unparseable_line_falls_back() {
        let parsed = parse_ingredient("salt to taste");
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, "piece");
        assert_eq!(parsed.name, "salt to taste");
        assert_eq!(
            parsed.error.as_deref(),
            Some("Could not parse ingredient details")
        );
    }

    #[test]
    fn test_bare_quantity_falls_back() {
        // A lone number has no name to extract
        let parsed = parse_ingredient("2");
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.name, "2");
        assert!(parsed.error.is_some());
    }

    #[test]
    fn test_non_string_value() {
        let parsed = parse_ingredient_value(&json!(42));
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, "piece");
        assert_eq!(parsed.name, "42");
        assert_eq!(parsed.error.as_deref(), Some("Invalid ingredient format"));
    }

    #[test]
    fn test_string_value_delegates() {
        let parsed = parse_ingredient_value(&json!("2 cups flour"));
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, "cups");
        assert_eq!(parsed.error, None);
    }

    #[test]
    fn test_zero_denominator_line_defaults_quantity() {
        let parsed = parse_ingredient("1/0 cup milk");
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, "cup");
        assert_eq!(parsed.name, "milk");
    }
}
