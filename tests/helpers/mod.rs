#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use nutrigraph::graph::{GraphStore, NodeId, Sentiment};
use std::collections::HashMap;

/// 2025-10-04 at the given hour and minute, UTC.
pub fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 4, hour, minute, 0).unwrap()
}

/// `base` shifted by a signed number of minutes.
pub fn plus_minutes(base: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    base + TimeDelta::minutes(minutes)
}

/// Add a meal with no nutrient data.
pub fn add_meal(graph: &mut GraphStore, ingredients: &[&str], at: DateTime<Utc>) -> NodeId {
    graph.add_meal(ingredients, &HashMap::new(), at, None).unwrap()
}

/// Add a meal with a nutrient map built from `(ingredient, [nutrients])` pairs.
pub fn add_meal_with_nutrients(
    graph: &mut GraphStore,
    ingredients: &[&str],
    nutrients: &[(&str, &[&str])],
    at: DateTime<Utc>,
) -> NodeId {
    let map: HashMap<String, Vec<String>> = nutrients
        .iter()
        .map(|(i, ns)| (i.to_string(), ns.iter().map(|n| n.to_string()).collect()))
        .collect();
    graph.add_meal(ingredients, &map, at, None).unwrap()
}

/// Add symptom logs with neutral sentiment and no severity.
pub fn add_logs(graph: &mut GraphStore, symptoms: &[&str], at: DateTime<Utc>) -> Vec<NodeId> {
    graph
        .add_symptom_log(symptoms, Sentiment::Neutral, at, None)
        .unwrap()
}
