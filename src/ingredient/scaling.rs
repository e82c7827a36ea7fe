//! Scaling and display facade
//!
//! Top-level operations composing the extractor, converter, and quantity
//! formatter for collaborators.

use serde::{Deserialize, Serialize};

use super::converter::{convert_units, optimal_unit, smart_convert_units};
use super::extractor::ParsedIngredient;
use super::quantity::format_quantity;

/// A scaled ingredient with the factor that produced it, kept for
/// provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    #[serde(flatten)]
    pub ingredient: ParsedIngredient,
    pub scale_factor: f64,
}

/// Scale an ingredient's quantity, leaving its unit alone
///
/// Returns a fresh record; the input is never mutated and the unit never
/// changes on this path. Unit re-selection is opt-in via
/// [`smart_scale_ingredient`].
pub fn scale_ingredient(parsed: &ParsedIngredient, scale_factor: f64) -> ScaledIngredient {
    ScaledIngredient {
        ingredient: ParsedIngredient {
            quantity: parsed.quantity * scale_factor,
            ..parsed.clone()
        },
        scale_factor,
    }
}

/// Scale an ingredient and re-select its display unit for the result
///
/// Delegates to [`smart_convert_units`], so the scaled record may carry
/// a different unit than the source when the result crosses a display
/// threshold. A conversion diagnostic, if any, replaces the parse
/// diagnostic.
pub fn smart_scale_ingredient(parsed: &ParsedIngredient, scale_factor: f64) -> ScaledIngredient {
    let converted = smart_convert_units(parsed.quantity, &parsed.unit, scale_factor);
    ScaledIngredient {
        ingredient: ParsedIngredient {
            quantity: converted.value,
            unit: converted.unit,
            error: converted.error.or_else(|| parsed.error.clone()),
            ..parsed.clone()
        },
        scale_factor,
    }
}

/// Render an ingredient as a display line: quantity, unit, name
///
/// With `use_optimal_units` the quantity is re-expressed in the unit
/// [`optimal_unit`] picks for it before rendering. Pluralization is a
/// plain `s` suffix whenever the quantity is not 1, which produces known
/// imperfect plurals ("2 ozs"); that is a limitation of the display
/// format, not something callers should correct for.
pub fn format_ingredient(parsed: &ParsedIngredient, use_optimal_units: bool) -> String {
    let (quantity, unit) = if use_optimal_units {
        let best = optimal_unit(parsed.quantity, &parsed.unit);
        if best != parsed.unit {
            let converted = convert_units(parsed.quantity, &parsed.unit, &best);
            (converted.value, converted.unit)
        } else {
            (parsed.quantity, parsed.unit.clone())
        }
    } else {
        (parsed.quantity, parsed.unit.clone())
    };

    format!(
        "{} {} {}",
        format_quantity(quantity),
        pluralize_unit(&unit, quantity),
        parsed.name
    )
}

/// Append `s` when the quantity is anything but one
fn pluralize_unit(unit: &str, quantity: f64) -> String {
    if quantity != 1.0 && !unit.ends_with('s') {
        format!("{}s", unit)
    } else {
        unit.to_string()
    }
}
