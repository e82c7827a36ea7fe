//! Recipe Scaling MCP Tools
//!
//! Tools that run the parse -> scale -> format pipeline over whole
//! ingredient lists.

use serde::Serialize;

use crate::ingredient::{
    format_ingredient, parse_ingredient, scale_ingredient, smart_scale_ingredient,
};

use super::ingredients::ScaledIngredientDetail;

/// Response for scale_recipe
#[derive(Debug, Serialize)]
pub struct ScaleRecipeResponse {
    pub original_servings: f64,
    pub target_servings: f64,
    pub scale_factor: f64,
    pub ingredients: Vec<ScaledIngredientDetail>,
    pub with_diagnostics: usize,
}

/// Scale a whole ingredient list from one serving count to another
///
/// Lines that do not parse still come through as fallback records with
/// their diagnostic; only non-positive serving counts are rejected, as a
/// caller contract violation rather than a data problem.
pub fn scale_recipe(
    lines: &[String],
    original_servings: f64,
    target_servings: f64,
    smart: bool,
) -> Result<ScaleRecipeResponse, String> {
    if !original_servings.is_finite() || original_servings <= 0.0 {
        return Err(format!(
            "original_servings must be a positive number, got {}",
            original_servings
        ));
    }
    if !target_servings.is_finite() || target_servings <= 0.0 {
        return Err(format!(
            "target_servings must be a positive number, got {}",
            target_servings
        ));
    }

    let scale_factor = target_servings / original_servings;

    let ingredients: Vec<ScaledIngredientDetail> = lines
        .iter()
        .map(|line| {
            let parsed = parse_ingredient(line);
            let scaled = if smart {
                smart_scale_ingredient(&parsed, scale_factor)
            } else {
                scale_ingredient(&parsed, scale_factor)
            };
            let display = format_ingredient(&scaled.ingredient, smart);
            ScaledIngredientDetail { scaled, display }
        })
        .collect();

    let with_diagnostics = ingredients
        .iter()
        .filter(|detail| detail.scaled.ingredient.error.is_some())
        .count();

    Ok(ScaleRecipeResponse {
        original_servings,
        target_servings,
        scale_factor,
        ingredients,
        with_diagnostics,
    })
}
