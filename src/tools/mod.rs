pub mod graph_stats;
pub mod log_meal;
pub mod log_symptoms;
pub mod query_symptom;

use chrono::{DateTime, Utc};
use graph_stats::{ExportGraphParams, GraphStatsParams, ListSymptomsParams};
use log_meal::{IngestMealAnalysisParams, LogMealParams};
use log_symptoms::{LogMoodParams, LogSymptomsParams};
use query_symptom::{AskQuestionParams, CoOccurringParams, QuerySymptomParams};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::NutriGraphConfig;
use crate::graph::{parse_timestamp, GraphError, Sentiment, Severity, SharedGraph};
use crate::insight::InsightContext;
use crate::intake::{self, MoodReport};

const MAX_QUERY_LIMIT: usize = 50;

/// The NutriGraph MCP tool handler. Holds the shared graph handle and config and
/// exposes all MCP tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct NutriGraphTools {
    tool_router: ToolRouter<Self>,
    graph: SharedGraph,
    config: Arc<NutriGraphConfig>,
}

#[tool_router]
impl NutriGraphTools {
    pub fn new(graph: SharedGraph, config: Arc<NutriGraphConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            graph,
            config,
        }
    }

    /// Record a meal with structured ingredients and nutrients.
    #[tool(description = "Log a meal: its ingredients, optional nutrients per ingredient, time eaten, and photo reference. Symptom logs within the correlation window are linked automatically.")]
    async fn log_meal(
        &self,
        Parameters(params): Parameters<LogMealParams>,
    ) -> Result<String, String> {
        tracing::info!(ingredients = params.ingredients.len(), "log_meal called");
        log_meal(&self.graph, params)
    }

    /// Record a meal from raw model replies.
    #[tool(description = "Log a meal from raw vision/nutrient model replies (JSON, optionally Markdown-fenced). Malformed replies are rejected.")]
    async fn ingest_meal_analysis(
        &self,
        Parameters(params): Parameters<IngestMealAnalysisParams>,
    ) -> Result<String, String> {
        tracing::info!("ingest_meal_analysis called");
        ingest_meal_analysis(&self.graph, params)
    }

    /// Record one or more symptoms felt at the same time.
    #[tool(description = "Log symptoms or feelings (e.g. 'Headache', 'High Energy') with sentiment and optional severity. One log per symptom, each linked to meals eaten within the window before it.")]
    async fn log_symptoms(
        &self,
        Parameters(params): Parameters<LogSymptomsParams>,
    ) -> Result<String, String> {
        tracing::info!(symptoms = params.symptoms.len(), "log_symptoms called");
        log_symptoms(&self.graph, params)
    }

    /// Record a free-text mood entry.
    #[tool(description = "Log a free-text mood entry using the text model's structured reading of it; falls back to logging the text itself as one symptom.")]
    async fn log_mood(
        &self,
        Parameters(params): Parameters<LogMoodParams>,
    ) -> Result<String, String> {
        tracing::info!(text_len = params.mood_text.len(), "log_mood called");
        log_mood(&self.graph, params)
    }

    /// Find ingredients correlated with a symptom.
    #[tool(description = "Rank ingredients eaten shortly before a symptom was logged, with nutrients, confidence, and a ready-to-send insight prompt.")]
    async fn query_symptom(
        &self,
        Parameters(params): Parameters<QuerySymptomParams>,
    ) -> Result<String, String> {
        tracing::info!(symptom = %params.symptom, "query_symptom called");
        query_symptom(&self.graph, &self.config, params)
    }

    /// Answer a natural-language question about a symptom.
    #[tool(description = "Answer a question like 'What foods give me energy?': resolve the symptom it asks about (from the text model's reply or keywords), then rank correlated ingredients as query_symptom does.")]
    async fn ask_question(
        &self,
        Parameters(params): Parameters<AskQuestionParams>,
    ) -> Result<String, String> {
        tracing::info!(question = %params.question, "ask_question called");
        ask_question(&self.graph, &self.config, params)
    }

    /// List every logged symptom with its frequency.
    #[tool(description = "List all logged symptoms with how many times each was logged, most frequent first.")]
    async fn list_symptoms(
        &self,
        Parameters(_params): Parameters<ListSymptomsParams>,
    ) -> Result<String, String> {
        let graph = self.graph.read().map_err(|e| e.to_string())?;
        to_json(&graph.symptoms())
    }

    /// Find symptoms logged close in time to a given symptom.
    #[tool(description = "Find symptoms that tend to be logged together with the given symptom.")]
    async fn co_occurring_symptoms(
        &self,
        Parameters(params): Parameters<CoOccurringParams>,
    ) -> Result<String, String> {
        let graph = self.graph.read().map_err(|e| e.to_string())?;
        let co = graph.co_occurring_symptoms(&params.symptom);
        Ok(serde_json::json!({
            "symptom": params.symptom,
            "co_occurring": co,
        })
        .to_string())
    }

    /// Get graph statistics.
    #[tool(description = "Get knowledge graph statistics: node and edge counts by kind.")]
    async fn graph_stats(
        &self,
        Parameters(_params): Parameters<GraphStatsParams>,
    ) -> Result<String, String> {
        let graph = self.graph.read().map_err(|e| e.to_string())?;
        to_json(&graph.stats())
    }

    /// Export every node and edge.
    #[tool(description = "Export all nodes (id, kind, attributes) and edges (source, target, kind) for visualization.")]
    async fn export_graph(
        &self,
        Parameters(_params): Parameters<ExportGraphParams>,
    ) -> Result<String, String> {
        let graph = self.graph.read().map_err(|e| e.to_string())?;
        to_json(&graph.snapshot())
    }
}

#[tool_handler]
impl ServerHandler for NutriGraphTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "NutriGraph links meals to how the user feels. Use log_meal and log_symptoms \
                 (or log_mood) to record events, then query_symptom (or ask_question for a \
                 free-form question) to find ingredients that tend to precede a symptom."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {e}"))
}

/// Explicit timestamp, or now when the caller left it out.
fn resolve_timestamp(timestamp: Option<&str>) -> Result<DateTime<Utc>, GraphError> {
    timestamp.map(parse_timestamp).transpose().map(|t| t.unwrap_or_else(Utc::now))
}

fn store_meal(
    graph: &SharedGraph,
    ingredients: Vec<String>,
    nutrients: HashMap<String, Vec<String>>,
    timestamp: Option<&str>,
    photo_ref: Option<&str>,
) -> Result<String, String> {
    let timestamp = resolve_timestamp(timestamp).map_err(|e| e.to_string())?;
    let meal_id = graph
        .write()
        .map_err(|e| e.to_string())?
        .add_meal(&ingredients, &nutrients, timestamp, photo_ref)
        .map_err(|e| e.to_string())?;

    tracing::info!(meal_id = %meal_id, "meal stored");

    Ok(serde_json::json!({
        "meal_id": meal_id,
        "ingredients": ingredients,
        "nutrients": nutrients,
        "timestamp": timestamp.to_rfc3339(),
    })
    .to_string())
}

fn store_symptoms(
    graph: &SharedGraph,
    symptoms: &[String],
    sentiment: Sentiment,
    severity: Option<Severity>,
    timestamp: DateTime<Utc>,
) -> Result<Vec<crate::graph::NodeId>, String> {
    let log_ids = graph
        .write()
        .map_err(|e| e.to_string())?
        .add_symptom_log(symptoms, sentiment, timestamp, severity)
        .map_err(|e| e.to_string())?;
    tracing::info!(logs = log_ids.len(), "symptoms stored");
    Ok(log_ids)
}

pub(crate) fn log_meal(graph: &SharedGraph, params: LogMealParams) -> Result<String, String> {
    store_meal(
        graph,
        params.ingredients,
        params.nutrients.unwrap_or_default(),
        params.timestamp.as_deref(),
        params.photo_ref.as_deref(),
    )
}

pub(crate) fn ingest_meal_analysis(
    graph: &SharedGraph,
    params: IngestMealAnalysisParams,
) -> Result<String, String> {
    let ingredients = intake::parse_ingredients(&params.vision_output).map_err(|e| e.to_string())?;
    let nutrients = params
        .nutrient_output
        .as_deref()
        .map(intake::parse_nutrients)
        .transpose()
        .map_err(|e| e.to_string())?
        .unwrap_or_default();

    store_meal(
        graph,
        ingredients,
        nutrients,
        params.timestamp.as_deref(),
        params.photo_ref.as_deref(),
    )
}

pub(crate) fn log_symptoms(graph: &SharedGraph, params: LogSymptomsParams) -> Result<String, String> {
    let sentiment = match params.sentiment.as_deref() {
        Some(s) => s.parse::<Sentiment>().map_err(|e| e.to_string())?,
        None => Sentiment::default(),
    };
    let severity = params
        .severity
        .as_deref()
        .map(str::parse::<Severity>)
        .transpose()
        .map_err(|e| e.to_string())?;
    let timestamp = resolve_timestamp(params.timestamp.as_deref()).map_err(|e| e.to_string())?;

    let log_ids = store_symptoms(graph, &params.symptoms, sentiment, severity, timestamp)?;

    Ok(serde_json::json!({
        "log_ids": log_ids,
        "symptoms": params.symptoms,
        "sentiment": sentiment,
        "severity": severity,
        "timestamp": timestamp.to_rfc3339(),
    })
    .to_string())
}

pub(crate) fn log_mood(graph: &SharedGraph, params: LogMoodParams) -> Result<String, String> {
    if params.mood_text.trim().is_empty() {
        return Err("mood_text must not be empty".into());
    }
    let timestamp = resolve_timestamp(params.timestamp.as_deref()).map_err(|e| e.to_string())?;

    let report = match params.model_output.as_deref().map(intake::parse_mood_report) {
        Some(Ok(report)) => report,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "mood parse failed, logging raw text");
            MoodReport::fallback(&params.mood_text)
        }
        None => MoodReport::fallback(&params.mood_text),
    };

    let log_ids = store_symptoms(
        graph,
        &report.symptoms,
        report.sentiment,
        Some(report.severity),
        timestamp,
    )?;

    Ok(serde_json::json!({
        "log_ids": log_ids,
        "symptoms": report.symptoms,
        "sentiment": report.sentiment,
        "severity": report.severity,
        "description": report.description,
        "timestamp": timestamp.to_rfc3339(),
    })
    .to_string())
}

pub(crate) fn query_symptom(
    graph: &SharedGraph,
    config: &NutriGraphConfig,
    params: QuerySymptomParams,
) -> Result<String, String> {
    answer_symptom(graph, config, &params.symptom, params.limit)
}

pub(crate) fn ask_question(
    graph: &SharedGraph,
    config: &NutriGraphConfig,
    params: AskQuestionParams,
) -> Result<String, String> {
    if params.question.trim().is_empty() {
        return Err("question must not be empty".into());
    }
    let symptom = intake::symptom_for_question(&params.question, params.model_output.as_deref())
        .ok_or_else(|| {
            "couldn't tell which symptom the question is about; try naming it, e.g. 'What causes nausea?'"
                .to_string()
        })?;
    tracing::info!(symptom = %symptom, "question resolved");
    answer_symptom(graph, config, &symptom, params.limit)
}

fn answer_symptom(
    graph: &SharedGraph,
    config: &NutriGraphConfig,
    symptom: &str,
    limit: Option<usize>,
) -> Result<String, String> {
    if symptom.trim().is_empty() {
        return Err("symptom must not be empty".into());
    }
    let limit = limit.unwrap_or(config.insight.top_n).clamp(1, MAX_QUERY_LIMIT);

    let (context, stats) = {
        let graph = graph.read().map_err(|e| e.to_string())?;
        (InsightContext::build(&graph, symptom, limit), graph.stats())
    };

    let (prompt, message) = match context.prompt() {
        Some(prompt) => (Some(prompt), None),
        None => (None, Some(context.no_data_message())),
    };

    Ok(serde_json::json!({
        "symptom": context.symptom,
        "frequency": context.frequency,
        "confidence": context.confidence,
        "correlated_ingredients": context.correlated,
        "insight_prompt": prompt,
        "message": message,
        "graph_stats": stats,
    })
    .to_string())
}
