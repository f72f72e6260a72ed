//! MCP symptom query tool parameter definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `query_symptom` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QuerySymptomParams {
    /// Symptom to correlate, matched case- and whitespace-insensitively.
    #[schemars(description = "Symptom to analyze, e.g. 'High Energy' or 'Bloated'")]
    pub symptom: String,

    #[schemars(description = "Maximum correlated ingredients to return (1-50). Defaults to the configured top_n.")]
    pub limit: Option<usize>,
}

/// Parameters for the `co_occurring_symptoms` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CoOccurringParams {
    #[schemars(description = "Symptom whose companions to find")]
    pub symptom: String,
}

/// Parameters for the `ask_question` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AskQuestionParams {
    #[schemars(description = "The user's question, e.g. 'What foods give me energy?'")]
    pub question: String,

    #[schemars(
        description = "Text model reply naming the symptom: {\"symptom\": \"High Energy\"}. If absent or unparseable, the symptom is guessed from keywords in the question."
    )]
    pub model_output: Option<String>,

    #[schemars(description = "Maximum correlated ingredients to return (1-50). Defaults to the configured top_n.")]
    pub limit: Option<usize>,
}
