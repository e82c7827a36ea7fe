//! Ingredient MCP Tools
//!
//! Tools for parsing ingredient lines and scaling or converting single
//! ingredients.

use serde::Serialize;
use serde_json::Value;

use crate::ingredient::{
    categorize_unit, format_ingredient, optimal_unit, parse_ingredient, parse_ingredient_value,
    scale_ingredient, smart_scale_ingredient, ParsedIngredient, ScaledIngredient, UnitCategory,
};

/// Response for parse_ingredients
#[derive(Debug, Serialize)]
pub struct ParseIngredientsResponse {
    pub ingredients: Vec<ParsedIngredient>,
    pub total: usize,
    pub parsed_cleanly: usize,
    pub with_diagnostics: usize,
}

/// A scaled ingredient together with its rendered display line
#[derive(Debug, Serialize)]
pub struct ScaledIngredientDetail {
    #[serde(flatten)]
    pub scaled: ScaledIngredient,
    pub display: String,
}

/// Response for get_optimal_unit
#[derive(Debug, Serialize)]
pub struct OptimalUnitResponse {
    pub value: f64,
    pub unit: String,
    pub category: UnitCategory,
    pub optimal_unit: String,
}

/// Parse a whole ingredient list in one call
///
/// Entries are raw JSON values; non-string entries come back as fallback
/// records rather than failing the batch.
pub fn parse_ingredient_list(entries: &[Value]) -> ParseIngredientsResponse {
    let ingredients: Vec<ParsedIngredient> =
        entries.iter().map(parse_ingredient_value).collect();
    let with_diagnostics = ingredients.iter().filter(|i| i.error.is_some()).count();

    ParseIngredientsResponse {
        total: ingredients.len(),
        parsed_cleanly: ingredients.len() - with_diagnostics,
        with_diagnostics,
        ingredients,
    }
}

/// Parse and scale one ingredient line
///
/// With `smart`, the display unit is re-selected for the scaled quantity;
/// otherwise the unit parsed from the line is kept as-is.
pub fn scale_line(
    text: &str,
    scale_factor: f64,
    smart: bool,
) -> Result<ScaledIngredientDetail, String> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(format!(
            "scale_factor must be a positive number, got {}",
            scale_factor
        ));
    }

    let parsed = parse_ingredient(text);
    let scaled = if smart {
        smart_scale_ingredient(&parsed, scale_factor)
    } else {
        scale_ingredient(&parsed, scale_factor)
    };
    let display = format_ingredient(&scaled.ingredient, smart);

    Ok(ScaledIngredientDetail { scaled, display })
}

/// Suggest a display unit for a value
pub fn suggest_display_unit(value: f64, unit: &str) -> OptimalUnitResponse {
    OptimalUnitResponse {
        value,
        unit: unit.trim().to_lowercase(),
        category: categorize_unit(unit),
        optimal_unit: optimal_unit(value, unit),
    }
}

/// Render a display line from already-structured ingredient fields
pub fn format_fields(quantity: f64, unit: &str, name: &str, use_optimal_units: bool) -> String {
    let parsed = ParsedIngredient {
        quantity,
        unit: unit.trim().to_lowercase(),
        name: name.to_string(),
        original: String::new(),
        error: None,
    };
    format_ingredient(&parsed, use_optimal_units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ingredient_list_counts() {
        let entries = vec![
            json!("2 cups flour"),
            json!("1 egg"),
            json!(null),
            json!("mystery ingredient"),
        ];
        let response = parse_ingredient_list(&entries);
        assert_eq!(response.total, 4);
        assert_eq!(response.parsed_cleanly, 2);
        assert_eq!(response.with_diagnostics, 2);
        assert_eq!(response.ingredients[0].unit, "cups");
        assert_eq!(
            response.ingredients[2].error.as_deref(),
            Some("Invalid ingredient format")
        );
    }

    #[test]
    fn test_scale_line_plain() {
        let detail = scale_line("2 cups flour", 2.0, false).expect("valid factor");
        assert_eq!(detail.scaled.ingredient.quantity, 4.0);
        assert_eq!(detail.scaled.ingredient.unit, "cups");
        assert_eq!(detail.display, "4 cups flour");
    }

    #[test]
    fn test_scale_line_smart_changes_unit() {
        let detail = scale_line("8 tbsp butter", 4.0, true).expect("valid factor");
        assert_eq!(detail.scaled.ingredient.unit, "cup");
        assert_eq!(detail.display, "2 cups butter");
    }

    #[test]
    fn test_scale_line_rejects_non_positive_factor() {
        assert!(scale_line("2 cups flour", 0.0, false).is_err());
        assert!(scale_line("2 cups flour", -1.0, false).is_err());
        assert!(scale_line("2 cups flour", f64::NAN, false).is_err());
    }

    #[test]
    fn test_suggest_display_unit() {
        let response = suggest_display_unit(100.0, "ML");
        assert_eq!(response.unit, "ml");
        assert_eq!(response.category, UnitCategory::Volume);
        assert_eq!(response.optimal_unit, "cup");
    }

    #[test]
    fn test_format_fields() {
        assert_eq!(format_fields(2.0, "cup", "flour", false), "2 cups flour");
        assert_eq!(format_fields(1.5, "cup", "sugar", true), "1 1/2 cups sugar");
    }
}
