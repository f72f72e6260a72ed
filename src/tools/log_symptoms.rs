//! MCP `log_symptoms` and `log_mood` tool parameter definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogSymptomsParams {
    #[schemars(description = "Symptom or feeling names, e.g. [\"Headache\", \"Fatigue\"]. One log is created per entry.")]
    pub symptoms: Vec<String>,

    #[schemars(description = "Overall sentiment: 'positive', 'negative', or 'neutral'. Defaults to neutral.")]
    pub sentiment: Option<String>,

    #[schemars(description = "Optional intensity: 'low', 'medium', or 'high'")]
    pub severity: Option<String>,

    #[schemars(description = "When the symptoms were felt. Defaults to now.")]
    pub timestamp: Option<String>,
}

/// Free-text mood entry plus the text model's structured reading of it.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogMoodParams {
    #[schemars(description = "What the user wrote, e.g. 'feeling great and energized!'")]
    pub mood_text: String,

    #[schemars(
        description = "Text model reply: {\"symptoms\": [...], \"sentiment\": ..., \"severity\": ..., \"description\": ...}. If absent or unparseable, the mood text itself is logged as one symptom."
    )]
    pub model_output: Option<String>,

    #[schemars(description = "When the mood was felt. Defaults to now.")]
    pub timestamp: Option<String>,
}
