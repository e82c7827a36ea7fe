//! Ingredient normalization and recipe scaling engine
//!
//! Pure, synchronous text/number transformations: free-form ingredient
//! lines in, structured records or display strings out. No I/O, no
//! shared state.

pub mod converter;
pub mod extractor;
pub mod quantity;
pub mod scaling;
pub mod units;

pub use converter::{convert_units, optimal_unit, smart_convert_units, Conversion, ConversionError};
pub use extractor::{parse_ingredient, parse_ingredient_value, ParsedIngredient};
pub use quantity::{
    format_quantity, format_quantity_with, parse_quantity, parse_quantity_strict, QuantityError,
    DEFAULT_FRACTIONS, DEFAULT_QUANTITY,
};
pub use scaling::{format_ingredient, scale_ingredient, smart_scale_ingredient, ScaledIngredient};
pub use units::{categorize_unit, count_factor, grams_per_unit, ml_per_unit, UnitCategory, DEFAULT_UNIT};
