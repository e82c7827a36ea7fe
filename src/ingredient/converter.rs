//! Unit conversion and display-unit selection
//!
//! Converts values across units within one category and heuristically
//! selects a more readable display unit after scaling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quantity::round_hundredths;
use super::units::{categorize_unit, count_factor, grams_per_unit, ml_per_unit, UnitCategory};

/// Largest volume, in milliliters, still displayed as teaspoons
const TSP_DISPLAY_MAX_ML: f64 = 15.0;
/// Largest volume, in milliliters, still displayed as tablespoons
const TBSP_DISPLAY_MAX_ML: f64 = 60.0;
/// Largest volume, in milliliters, still displayed as cups
const CUP_DISPLAY_MAX_ML: f64 = 1000.0;
/// Largest weight, in grams, still displayed as grams
const GRAM_DISPLAY_MAX_G: f64 = 1000.0;

/// Conversion errors
///
/// Carried as a diagnostic string in the [`Conversion`] record; the
/// value itself always comes back usable.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("cannot convert {from} ({from_category:?}) to {to} ({to_category:?})")]
    CategoryMismatch {
        from: String,
        from_category: UnitCategory,
        to: String,
        to_category: UnitCategory,
    },
}

/// Result of a unit conversion
///
/// When `error` is set the conversion could not be performed and the
/// value and unit are the caller's originals, unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub value: f64,
    pub unit: String,
    pub error: Option<String>,
}

/// Factor expressing `unit` in its category's base unit
///
/// Present for every unit the category tables recognize; the base units
/// themselves map to 1.
fn base_factor(unit: &str, category: UnitCategory) -> Option<f64> {
    match category {
        UnitCategory::Volume => ml_per_unit(unit),
        UnitCategory::Weight => grams_per_unit(unit),
        UnitCategory::Count => count_factor(unit),
        UnitCategory::Unknown => None,
    }
}

/// Convert a value between two units of the same category
///
/// Cross-category requests (including unknown units on either side) fail
/// soft: the original value and unit come back with `error` describing
/// the mismatch.
pub fn convert_units(value: f64, from_unit: &str, to_unit: &str) -> Conversion {
    let from_category = categorize_unit(from_unit);
    let to_category = categorize_unit(to_unit);

    if from_category != to_category || from_category == UnitCategory::Unknown {
        let err = ConversionError::CategoryMismatch {
            from: from_unit.trim().to_lowercase(),
            from_category,
            to: to_unit.trim().to_lowercase(),
            to_category,
        };
        tracing::warn!("{}", err);
        return Conversion {
            value,
            unit: from_unit.trim().to_lowercase(),
            error: Some(err.to_string()),
        };
    }

    // Both lookups succeed once the categories agree and are known
    let from_factor = base_factor(from_unit, from_category).unwrap_or(1.0);
    let to_factor = base_factor(to_unit, to_category).unwrap_or(1.0);

    Conversion {
        value: round_hundredths(value * from_factor / to_factor),
        unit: to_unit.trim().to_lowercase(),
        error: None,
    }
}

/// Choose a more readable display unit for a value
///
/// Count and unknown units come back unchanged; no "optimal" form
/// applies to them.
pub fn optimal_unit(value: f64, unit: &str) -> String {
    match categorize_unit(unit) {
        UnitCategory::Volume => {
            let ml = value * ml_per_unit(unit).unwrap_or(1.0);
            if ml < TSP_DISPLAY_MAX_ML {
                "tsp"
            } else if ml < TBSP_DISPLAY_MAX_ML {
                "tbsp"
            } else if ml < CUP_DISPLAY_MAX_ML {
                "cup"
            } else {
                "liter"
            }
            .to_string()
        }
        UnitCategory::Weight => {
            let grams = value * grams_per_unit(unit).unwrap_or(1.0);
            if grams < GRAM_DISPLAY_MAX_G { "g" } else { "kg" }.to_string()
        }
        UnitCategory::Count | UnitCategory::Unknown => unit.trim().to_lowercase(),
    }
}

/// Scale a value and re-express it in the optimal unit for the result
///
/// When the optimal unit for the scaled value is the unit it already
/// carries, the unit is kept. Scaling across a display threshold changes
/// the reported unit on purpose: half a cup doubled twice reports as
/// cups, not tablespoons.
pub fn smart_convert_units(value: f64, unit: &str, scale_factor: f64) -> Conversion {
    let scaled = value * scale_factor;
    let best = optimal_unit(scaled, unit);

    if best == unit.trim().to_lowercase() {
        return Conversion {
            value: round_hundredths(scaled),
            unit: best,
            error: None,
        };
    }

    convert_units(scaled, unit, &best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_ml_to_cup() {
        let result = convert_units(236.588, "ml", "cup");
        assert!((result.value - 1.0).abs() < 0.01);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_convert_tbsp_to_tsp() {
        let result = convert_units(1.0, "tbsp", "tsp");
        assert!((result.value - 3.0).abs() < 0.01);
        assert_eq!(result.unit, "tsp");
    }

    #[test]
    fn test_convert_lb_to_g() {
        let result = convert_units(2.0, "lb", "g");
        assert!((result.value - 907.18).abs() < 0.01);
    }

    #[test]
    fn test_convert_dozen_to_pieces() {
        let result = convert_units(1.5, "dozen", "piece");
        assert_eq!(result.value, 18.0);
        assert_eq!(result.unit, "piece");
    }

    #[test]
    fn test_convert_rounds_to_hundredths() {
        let result = convert_units(1.0, "cup", "tbsp");
        assert_eq!(result.value, 16.0);
    }

    #[test]
    fn test_cross_category_fails_soft() {
        let result = convert_units(1.0, "cup", "kg");
        assert_eq!(result.value, 1.0);
        assert_eq!(result.unit, "cup");
        let err = result.error.expect("expected a cross-category error");
        assert!(err.contains("cup"));
        assert!(err.contains("kg"));
    }

    #[test]
    fn test_unknown_unit_fails_soft() {
        let result = convert_units(3.0, "pinch", "tsp");
        assert_eq!(result.value, 3.0);
        assert_eq!(result.unit, "pinch");
        assert!(result.error.is_some());
    }

    #[test]
    fn test_optimal_unit_volume_ladder() {
        assert_eq!(optimal_unit(2.0, "tsp"), "tsp");
        assert_eq!(optimal_unit(2.0, "tbsp"), "tbsp");
        assert_eq!(optimal_unit(100.0, "ml"), "cup");
        assert_eq!(optimal_unit(2.0, "liter"), "liter");
        assert_eq!(optimal_unit(5.0, "cup"), "liter");
    }

    #[test]
    fn test_optimal_unit_weight_ladder() {
        assert_eq!(optimal_unit(500.0, "g"), "g");
        assert_eq!(optimal_unit(1500.0, "g"), "kg");
        assert_eq!(optimal_unit(3.0, "lb"), "kg");
        assert_eq!(optimal_unit(2.0, "oz"), "g");
    }

    #[test]
    fn test_optimal_unit_count_and_unknown_unchanged() {
        assert_eq!(optimal_unit(40.0, "piece"), "piece");
        assert_eq!(optimal_unit(40.0, "pinch"), "pinch");
    }

    #[test]
    fn test_smart_convert_keeps_unit_below_threshold() {
        // 0.5 cup x 4 = 2 cups = 473.176 ml, below the liter threshold
        let result = smart_convert_units(0.5, "cup", 4.0);
        assert_eq!(result.value, 2.0);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_smart_convert_promotes_across_threshold() {
        // 8 tbsp x 4 = 32 tbsp = 473.18 ml, reported in cups
        let result = smart_convert_units(8.0, "tbsp", 4.0);
        assert_eq!(result.unit, "cup");
        assert!((result.value - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_smart_convert_demotes_small_results() {
        // 0.5 cup x 0.05 = 0.025 cup = 5.91 ml, reported in teaspoons
        let result = smart_convert_units(0.5, "cup", 0.05);
        assert_eq!(result.unit, "tsp");
        assert!((result.value - 1.2).abs() < 0.01);
    }

    #[test]
    fn test_smart_convert_weight_to_kg() {
        let result = smart_convert_units(400.0, "g", 5.0);
        assert_eq!(result.unit, "kg");
        assert_eq!(result.value, 2.0);
    }

    #[test]
    fn test_smart_convert_unknown_unit_scales_plainly() {
        let result = smart_convert_units(2.0, "pinch", 3.0);
        assert_eq!(result.value, 6.0);
        assert_eq!(result.unit, "pinch");
        assert_eq!(result.error, None);
    }
}
