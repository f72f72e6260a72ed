//! Validation of model output before it reaches the graph.
//!
//! The vision and text models are asked for bare JSON but routinely wrap it in
//! Markdown fences or drift from the requested shape. These parsers accept the
//! shapes the prompts ask for, tolerate the known deviations, and reject everything
//! else with [`GraphError::InvalidInput`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::graph::{GraphError, Sentiment, Severity};

/// Structured mood record extracted from free-form text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodReport {
    pub symptoms: Vec<String>,
    pub sentiment: Sentiment,
    pub severity: Severity,
    pub description: String,
}

impl MoodReport {
    /// The record used when the model reply cannot be parsed: the whole text becomes
    /// one title-cased symptom with neutral sentiment and medium severity.
    pub fn fallback(mood_text: &str) -> Self {
        let description = mood_text.trim().to_string();
        Self {
            symptoms: vec![title_case(&description)],
            sentiment: Sentiment::Neutral,
            severity: Severity::Medium,
            description,
        }
    }
}

#[derive(Deserialize)]
struct RawIngredients {
    ingredients: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
struct RawMood {
    symptoms: OneOrMany,
    sentiment: Option<String>,
    severity: Option<String>,
    description: Option<String>,
}

/// Remove a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn parse_json<'a, T: Deserialize<'a>>(text: &'a str, what: &str) -> Result<T, GraphError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| GraphError::invalid(format!("malformed {what} response: {e}")))
}

/// Parse `{"ingredients": ["avocado", ...]}`.
pub fn parse_ingredients(text: &str) -> Result<Vec<String>, GraphError> {
    let raw: RawIngredients = parse_json(text, "ingredient")?;
    Ok(raw.ingredients)
}

/// Parse `{"avocado": ["Healthy Fats", "Fiber"], ...}`.
pub fn parse_nutrients(text: &str) -> Result<HashMap<String, Vec<String>>, GraphError> {
    parse_json(text, "nutrient")
}

/// Parse `{"symptoms": [...], "sentiment": ..., "severity": ..., "description": ...}`.
///
/// `symptoms` may be a bare string. Missing sentiment defaults to neutral, missing
/// severity to medium, and a missing description to the symptom list.
pub fn parse_mood_report(text: &str) -> Result<MoodReport, GraphError> {
    let raw: RawMood = parse_json(text, "mood")?;

    let symptoms: Vec<String> = match raw.symptoms {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    }
    .into_iter()
    .filter(|s| !s.trim().is_empty())
    .collect();
    if symptoms.is_empty() {
        return Err(GraphError::invalid("mood response lists no symptoms"));
    }

    let sentiment = raw
        .sentiment
        .as_deref()
        .map(str::parse::<Sentiment>)
        .transpose()?
        .unwrap_or_default();
    let severity = raw
        .severity
        .as_deref()
        .map(str::parse::<Severity>)
        .transpose()?
        .unwrap_or_default();
    let description = raw.description.unwrap_or_else(|| symptoms.join(", "));

    Ok(MoodReport {
        symptoms,
        sentiment,
        severity,
        description,
    })
}

#[derive(Deserialize)]
struct RawSymptomQuestion {
    symptom: String,
}

/// Parse `{"symptom": "High Energy"}`, the text model's reading of a question such
/// as "what foods give me energy?".
pub fn parse_symptom_question(text: &str) -> Result<String, GraphError> {
    let raw: RawSymptomQuestion = parse_json(text, "symptom")?;
    let symptom = raw.symptom.trim();
    if symptom.is_empty() {
        return Err(GraphError::invalid("symptom response names no symptom"));
    }
    Ok(symptom.to_string())
}

/// Keyword guesses used when no model reading of a question is available.
const QUESTION_KEYWORDS: &[(&[&str], &str)] = &[
    (&["energy", "energetic"], "High Energy"),
    (&["headache", "migraine"], "Headache"),
    (&["nausea", "nauseous"], "Nausea"),
    (&["mood"], "Good Mood"),
    (&["tired", "fatigue"], "Fatigue"),
];

/// Guess the symptom a question asks about from well-known keywords.
pub fn symptom_from_keywords(question: &str) -> Option<&'static str> {
    let question = question.to_lowercase();
    QUESTION_KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| question.contains(w)))
        .map(|(_, symptom)| *symptom)
}

/// The symptom a question asks about: the model's reading when it parses, otherwise
/// a keyword guess. `None` when neither yields a symptom.
pub fn symptom_for_question(question: &str, model_output: Option<&str>) -> Option<String> {
    if let Some(reply) = model_output {
        match parse_symptom_question(reply) {
            Ok(symptom) => return Some(symptom),
            Err(e) => tracing::warn!(error = %e, "symptom parse failed, trying keywords"),
        }
    }
    symptom_from_keywords(question).map(str::to_string)
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let text = "```json\n{\"ingredients\": [\"avocado\"]}\n```";
        assert_eq!(strip_code_fence(text), "{\"ingredients\": [\"avocado\"]}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```\n"), "{}");
    }

    #[test]
    fn strips_single_line_fence() {
        let text = "```json {\"ingredients\": [\"avocado\"]} ```";
        assert_eq!(strip_code_fence(text), "{\"ingredients\": [\"avocado\"]}");
        assert_eq!(parse_ingredients(text).unwrap(), vec!["avocado"]);
        assert_eq!(strip_code_fence("```{}```"), "{}");
    }

    #[test]
    fn parses_fenced_ingredients() {
        let text = "```json\n{\"ingredients\": [\"avocado\", \"cherry tomatoes\"]}\n```";
        assert_eq!(parse_ingredients(text).unwrap(), vec!["avocado", "cherry tomatoes"]);
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(matches!(
            parse_ingredients("{\"items\": []}"),
            Err(GraphError::InvalidInput(_))
        ));
        assert!(parse_nutrients("not json").is_err());
        assert!(parse_nutrients("{\"avocado\": \"Fiber\"}").is_err());
    }

    #[test]
    fn parses_nutrient_map() {
        let map = parse_nutrients("{\"avocado\": [\"Healthy Fats\", \"Fiber\"]}").unwrap();
        assert_eq!(map["avocado"], vec!["Healthy Fats", "Fiber"]);
    }

    #[test]
    fn mood_report_defaults_and_coercion() {
        let report = parse_mood_report("{\"symptoms\": \"Headache\"}").unwrap();
        assert_eq!(report.symptoms, vec!["Headache"]);
        assert_eq!(report.sentiment, Sentiment::Neutral);
        assert_eq!(report.severity, Severity::Medium);
        assert_eq!(report.description, "Headache");
    }

    #[test]
    fn mood_report_full() {
        let text = r#"{"symptoms": ["High Energy", "Good Mood"], "sentiment": "positive", "severity": "high", "description": "Feeling great"}"#;
        let report = parse_mood_report(text).unwrap();
        assert_eq!(report.symptoms.len(), 2);
        assert_eq!(report.sentiment, Sentiment::Positive);
        assert_eq!(report.severity, Severity::High);
    }

    #[test]
    fn mood_report_rejects_bad_enums_and_empty() {
        assert!(parse_mood_report(r#"{"symptoms": ["x"], "sentiment": "meh"}"#).is_err());
        assert!(parse_mood_report(r#"{"symptoms": []}"#).is_err());
        assert!(parse_mood_report(r#"{"sentiment": "positive"}"#).is_err());
    }

    #[test]
    fn mood_report_drops_blank_symptoms() {
        let report = parse_mood_report(r#"{"symptoms": ["Headache", "  "]}"#).unwrap();
        assert_eq!(report.symptoms, vec!["Headache"]);
        assert!(parse_mood_report(r#"{"symptoms": [" "]}"#).is_err());
        assert!(parse_mood_report(r#"{"symptoms": ""}"#).is_err());
    }

    #[test]
    fn symptom_question_parses_model_reply() {
        assert_eq!(
            parse_symptom_question("```json\n{\"symptom\": \" Stomach Pain \"}\n```").unwrap(),
            "Stomach Pain"
        );
        assert!(parse_symptom_question(r#"{"symptom": ""}"#).is_err());
        assert!(parse_symptom_question("Nausea").is_err());
    }

    #[test]
    fn symptom_question_keyword_fallback() {
        assert_eq!(symptom_from_keywords("What gives me ENERGY?"), Some("High Energy"));
        assert_eq!(symptom_from_keywords("why the migraines"), Some("Headache"));
        assert_eq!(symptom_from_keywords("what makes me tired?"), Some("Fatigue"));
        assert_eq!(symptom_from_keywords("what causes rashes?"), None);

        assert_eq!(
            symptom_for_question("what makes me nauseous?", Some("not json")),
            Some("Nausea".to_string())
        );
        assert_eq!(
            symptom_for_question("what makes me tired?", Some(r#"{"symptom": "Sleepy"}"#)),
            Some("Sleepy".to_string())
        );
        assert_eq!(symptom_for_question("what causes rashes?", None), None);
    }

    #[test]
    fn fallback_title_cases_text() {
        let report = MoodReport::fallback("  a bit TIRED ");
        assert_eq!(report.symptoms, vec!["A Bit Tired"]);
        assert_eq!(report.description, "a bit TIRED");
        assert_eq!(report.sentiment, Sentiment::Neutral);
    }
}
