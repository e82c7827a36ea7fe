//! Unit category tables and conversion constants
//!
//! Maps unit synonyms (full word, abbreviation, singular, plural) to a
//! factor relative to each category's base unit.

use serde::{Deserialize, Serialize};

/// Unit assumed when an ingredient line carries no recognizable unit
pub const DEFAULT_UNIT: &str = "piece";

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    /// Volume units (ml, tsp, cup, ...), base milliliters
    Volume,
    /// Weight/mass units (g, oz, lb, kg), base grams
    Weight,
    /// Count/discrete units (piece, each, dozen), base single items
    Count,
    /// Anything the tables do not recognize
    Unknown,
}

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per pint (US)
pub const ML_PER_PINT: f64 = 473.176;
/// Milliliters per quart (US)
pub const ML_PER_QUART: f64 = 946.353;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.41;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

// ============================================================================
// Count Conversion Constants (to single items)
// ============================================================================

/// Items per dozen
pub const ITEMS_PER_DOZEN: f64 = 12.0;

// ============================================================================
// Unit Recognition
// ============================================================================

/// Get the conversion factor to milliliters for a volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some(1.0),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(ML_PER_LITER),
        "tsp" | "teaspoon" | "teaspoons" => Some(ML_PER_TSP),
        "tbsp" | "tablespoon" | "tablespoons" => Some(ML_PER_TBSP),
        "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Some(ML_PER_FL_OZ),
        "cup" | "cups" => Some(ML_PER_CUP),
        "pint" | "pints" => Some(ML_PER_PINT),
        "quart" | "quarts" => Some(ML_PER_QUART),
        "gallon" | "gallons" => Some(ML_PER_GALLON),
        _ => None,
    }
}

/// Get the conversion factor to grams for a weight unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "g" | "gram" | "grams" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        _ => None,
    }
}

/// Get the item-count factor for a count unit
pub fn count_factor(unit: &str) -> Option<f64> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "piece" | "pieces" | "each" | "item" | "items" | "count" | "unit" | "units" => Some(1.0),
        "dozen" | "dozens" => Some(ITEMS_PER_DOZEN),
        _ => None,
    }
}

/// Determine the category of a unit string
///
/// Tried against volume, then weight, then count, in that fixed priority
/// order; first match wins.
pub fn categorize_unit(unit: &str) -> UnitCategory {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    if ml_per_unit(trimmed).is_some() {
        return UnitCategory::Volume;
    }

    if grams_per_unit(trimmed).is_some() {
        return UnitCategory::Weight;
    }

    if count_factor(trimmed).is_some() {
        return UnitCategory::Count;
    }

    UnitCategory::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_volume_units() {
        assert_eq!(categorize_unit("ml"), UnitCategory::Volume);
        assert_eq!(categorize_unit("tsp"), UnitCategory::Volume);
        assert_eq!(categorize_unit("tbsp"), UnitCategory::Volume);
        assert_eq!(categorize_unit("cup"), UnitCategory::Volume);
        assert_eq!(categorize_unit("fluid ounces"), UnitCategory::Volume);
    }

    #[test]
    fn test_categorize_weight_units() {
        assert_eq!(categorize_unit("g"), UnitCategory::Weight);
        assert_eq!(categorize_unit("grams"), UnitCategory::Weight);
        assert_eq!(categorize_unit("oz"), UnitCategory::Weight);
        assert_eq!(categorize_unit("lb"), UnitCategory::Weight);
        assert_eq!(categorize_unit("kg"), UnitCategory::Weight);
    }

    #[test]
    fn test_categorize_count_units() {
        assert_eq!(categorize_unit("piece"), UnitCategory::Count);
        assert_eq!(categorize_unit("each"), UnitCategory::Count);
        assert_eq!(categorize_unit("dozen"), UnitCategory::Count);
    }

    #[test]
    fn test_categorize_unknown_units() {
        assert_eq!(categorize_unit("pinch"), UnitCategory::Unknown);
        assert_eq!(categorize_unit("scoop"), UnitCategory::Unknown);
        assert_eq!(categorize_unit(""), UnitCategory::Unknown);
    }

    #[test]
    fn test_categorize_is_case_and_whitespace_insensitive() {
        assert_eq!(categorize_unit(" CUP "), UnitCategory::Volume);
        assert_eq!(categorize_unit("Tbsp"), UnitCategory::Volume);
        assert_eq!(categorize_unit("  KG"), UnitCategory::Weight);
    }

    #[test]
    fn test_ml_per_unit() {
        assert_eq!(ml_per_unit("ml"), Some(1.0));
        assert_eq!(ml_per_unit("tbsp"), Some(ML_PER_TBSP));
        assert_eq!(ml_per_unit("cup"), Some(ML_PER_CUP));
        assert_eq!(ml_per_unit("g"), None);
    }

    #[test]
    fn test_grams_per_unit() {
        assert_eq!(grams_per_unit("g"), Some(1.0));
        assert_eq!(grams_per_unit("oz"), Some(G_PER_OZ));
        assert_eq!(grams_per_unit("lb"), Some(G_PER_LB));
        assert_eq!(grams_per_unit("cup"), None);
    }

    #[test]
    fn test_count_factor() {
        assert_eq!(count_factor("piece"), Some(1.0));
        assert_eq!(count_factor("units"), Some(1.0));
        assert_eq!(count_factor("dozen"), Some(ITEMS_PER_DOZEN));
        assert_eq!(count_factor("cup"), None);
    }

    #[test]
    fn test_base_units_map_to_one() {
        assert_eq!(ml_per_unit("ml"), Some(1.0));
        assert_eq!(grams_per_unit("g"), Some(1.0));
        assert_eq!(count_factor("piece"), Some(1.0));
    }
}
