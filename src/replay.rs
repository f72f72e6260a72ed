//! Rebuild a graph from a JSON events file.
//!
//! The file holds meal and symptom events in any order:
//!
//! ```json
//! {"events": [
//!   {"type": "meal", "ingredients": ["Avocado"], "timestamp": "2025-10-04T12:00:00"},
//!   {"type": "symptoms", "symptoms": ["High Energy"], "sentiment": "positive",
//!    "timestamp": "2025-10-04T13:00:00"}
//! ]}
//! ```
//!
//! Events are applied in file order. Nothing is written back.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::graph::{parse_timestamp, GraphSettings, GraphStore, Sentiment, Severity};

#[derive(Debug, Deserialize)]
pub struct EventLog {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Meal {
        ingredients: Vec<String>,
        #[serde(default)]
        nutrients: HashMap<String, Vec<String>>,
        timestamp: String,
        photo_ref: Option<String>,
    },
    Symptoms {
        symptoms: Vec<String>,
        sentiment: Option<String>,
        severity: Option<String>,
        timestamp: String,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub meals: usize,
    pub logs: usize,
}

/// Read and parse an events file.
pub fn load_events(path: &Path) -> Result<EventLog> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse events file: {}", path.display()))
}

/// Apply one event to the graph.
pub fn apply_event(graph: &mut GraphStore, event: &Event) -> Result<ReplaySummary> {
    match event {
        Event::Meal {
            ingredients,
            nutrients,
            timestamp,
            photo_ref,
        } => {
            let timestamp = parse_timestamp(timestamp)?;
            graph.add_meal(ingredients, nutrients, timestamp, photo_ref.as_deref())?;
            Ok(ReplaySummary { meals: 1, logs: 0 })
        }
        Event::Symptoms {
            symptoms,
            sentiment,
            severity,
            timestamp,
        } => {
            let sentiment = match sentiment.as_deref() {
                Some(s) => s.parse::<Sentiment>()?,
                None => Sentiment::default(),
            };
            let severity = severity
                .as_deref()
                .map(str::parse::<Severity>)
                .transpose()?;
            let timestamp = parse_timestamp(timestamp)?;
            let ids = graph.add_symptom_log(symptoms, sentiment, timestamp, severity)?;
            Ok(ReplaySummary {
                meals: 0,
                logs: ids.len(),
            })
        }
    }
}

/// Build a fresh graph from `log`. Stops at the first bad event.
pub fn replay(log: &EventLog, settings: GraphSettings) -> Result<(GraphStore, ReplaySummary)> {
    let mut graph = GraphStore::new(settings);
    let mut summary = ReplaySummary::default();

    for (i, event) in log.events.iter().enumerate() {
        let applied = apply_event(&mut graph, event).with_context(|| format!("event #{i} rejected"))?;
        summary.meals += applied.meals;
        summary.logs += applied.logs;
    }

    tracing::info!(meals = summary.meals, logs = summary.logs, "events replayed");
    Ok((graph, summary))
}

/// [`load_events`] then [`replay`].
pub fn replay_file(path: &Path, settings: GraphSettings) -> Result<(GraphStore, ReplaySummary)> {
    let log = load_events(path)?;
    replay(&log, settings)
}
