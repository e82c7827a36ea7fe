//! Sous MCP Server Implementation
//!
//! Implements the MCP server with all Sous tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::ingredient;
use crate::tools::ingredients;
use crate::tools::recipes;
use crate::tools::status::{StatusTracker, SCALING_INSTRUCTIONS};

/// Sous MCP Service
#[derive(Clone)]
pub struct SousService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    tool_router: ToolRouter<SousService>,
}

impl SousService {
    pub fn new() -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for SousService {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseIngredientParams {
    /// Free-form ingredient line (e.g. "2 cups flour", "butter - 2 tbsp")
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseIngredientsParams {
    /// Ingredient lines. Strings are parsed; non-string entries are
    /// recorded with a parse error instead of failing the batch.
    pub lines: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleIngredientParams {
    /// Free-form ingredient line to parse and scale
    pub text: String,
    /// Multiplier to apply to the quantity (must be positive)
    pub scale_factor: f64,
    /// Re-select the display unit for the scaled quantity (default false)
    #[serde(default)]
    pub smart: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleRecipeParams {
    /// Free-form ingredient lines, one per ingredient
    pub lines: Vec<String>,
    /// Serving count the recipe was written for
    pub original_servings: f64,
    /// Serving count to scale to
    pub target_servings: f64,
    /// Re-select display units for the scaled quantities (default false)
    #[serde(default)]
    pub smart: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    /// Value to convert
    pub value: f64,
    /// Unit the value is currently in (e.g. "ml", "cups", "oz")
    pub from_unit: String,
    /// Unit to convert to (must be in the same category)
    pub to_unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetOptimalUnitParams {
    /// Quantity to find a display unit for
    pub value: f64,
    /// Unit the quantity is currently in
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FormatIngredientParams {
    /// Quantity to render
    pub quantity: f64,
    /// Unit token (e.g. "cup", "g", "piece")
    pub unit: String,
    /// Ingredient name
    pub name: String,
    /// Re-express the quantity in its optimal display unit (default true)
    #[serde(default = "default_true")]
    pub use_optimal_units: bool,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl SousService {
    // --- Status ---

    #[tool(
        description = "Get the current status of the Sous service including build info and process information"
    )]
    async fn sous_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        description = "Get step-by-step instructions for parsing and scaling recipe ingredients. Call this when starting a recipe editing session or when unsure how to use the scaling tools."
    )]
    fn scaling_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            SCALING_INSTRUCTIONS,
        )]))
    }

    // --- Parsing ---

    #[tool(
        description = "Parse a free-form ingredient line into structured quantity, unit, and name. Never fails: unparseable lines come back with quantity 1, unit 'piece', and an error diagnostic."
    )]
    fn parse_ingredient(
        &self,
        Parameters(p): Parameters<ParseIngredientParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = ingredient::parse_ingredient(&p.text);
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        description = "Parse a whole ingredient list in one call. PREFERRED over parse_ingredient when handling a full recipe - reduces tool calls from N to 1 and reports how many lines parsed cleanly."
    )]
    fn parse_ingredients(
        &self,
        Parameters(p): Parameters<ParseIngredientsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = ingredients::parse_ingredient_list(&p.lines);
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Scaling ---

    #[tool(
        description = "Parse and scale one ingredient line by a factor. With smart=true the display unit is re-selected for the scaled quantity (8 tbsp x4 reports as 2 cups)."
    )]
    fn scale_ingredient(
        &self,
        Parameters(p): Parameters<ScaleIngredientParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = ingredients::scale_line(&p.text, p.scale_factor, p.smart)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        description = "Scale a whole ingredient list from one serving count to another. Returns structured records plus ready display strings for each line. Use smart=true for display surfaces, smart=false to preserve the author's units."
    )]
    fn scale_recipe(
        &self,
        Parameters(p): Parameters<ScaleRecipeParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = recipes::scale_recipe(&p.lines, p.original_servings, p.target_servings, p.smart)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Conversion ---

    #[tool(
        description = "Convert a value between two units of the same category (volume, weight, or count). Cross-category requests return the original value unchanged with an error field."
    )]
    fn convert_units(
        &self,
        Parameters(p): Parameters<ConvertUnitsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = ingredient::convert_units(p.value, &p.from_unit, &p.to_unit);
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(
        description = "Suggest the most readable display unit for a quantity (e.g. 100 ml reports best as cups, 1500 g as kg). Count and unrecognized units come back unchanged."
    )]
    fn get_optimal_unit(
        &self,
        Parameters(p): Parameters<GetOptimalUnitParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = ingredients::suggest_display_unit(p.value, &p.unit);
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Formatting ---

    #[tool(
        description = "Render structured ingredient fields as a display line like '1 1/2 cups sugar'. Quantities snap to common culinary fractions; units are pluralized with a plain s suffix."
    )]
    fn format_ingredient(
        &self,
        Parameters(p): Parameters<FormatIngredientParams>,
    ) -> Result<CallToolResult, McpError> {
        let display = ingredients::format_fields(p.quantity, &p.unit, &p.name, p.use_optimal_units);
        let json = serde_json::json!({ "display": display }).to_string();
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for SousService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sous".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Sous - Ingredient Parsing & Recipe Scaling".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Sous - ingredient parsing and recipe scaling for cooking assistants. \
                 IMPORTANT: Call scaling_instructions before a recipe editing session. \
                 Parsing: parse_ingredient (one line), parse_ingredients (whole list). \
                 Scaling: scale_ingredient (one line), scale_recipe (whole list, preferred). \
                 Units: convert_units, get_optimal_unit. \
                 Display: format_ingredient. \
                 All parsing is tolerant: records always come back usable, with an error \
                 field set when a line or conversion could not be handled."
                    .into(),
            ),
        }
    }
}
