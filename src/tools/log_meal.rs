//! MCP `log_meal` and `ingest_meal_analysis` tool parameter definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogMealParams {
    #[schemars(description = "Ingredient names in the meal, e.g. [\"avocado\", \"cherry tomatoes\"]. May be empty.")]
    pub ingredients: Vec<String>,

    #[schemars(
        description = "Optional map from ingredient name to its nutrients, e.g. {\"avocado\": [\"Healthy Fats\", \"Fiber\"]}"
    )]
    pub nutrients: Option<HashMap<String, Vec<String>>>,

    #[schemars(description = "When the meal was eaten (RFC 3339 or YYYY-MM-DDTHH:MM:SS, UTC). Defaults to now.")]
    pub timestamp: Option<String>,

    #[schemars(description = "Optional reference to the meal photo (file name or URL)")]
    pub photo_ref: Option<String>,
}

/// Raw vision/text model replies for a meal photo, validated before storage.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IngestMealAnalysisParams {
    #[schemars(description = "Vision model reply: {\"ingredients\": [...]}, optionally fenced in Markdown")]
    pub vision_output: String,

    #[schemars(description = "Optional nutrient model reply: {\"ingredient\": [\"Nutrient\", ...]}")]
    pub nutrient_output: Option<String>,

    #[schemars(description = "When the meal was eaten. Defaults to now.")]
    pub timestamp: Option<String>,

    #[schemars(description = "Optional reference to the meal photo")]
    pub photo_ref: Option<String>,
}
