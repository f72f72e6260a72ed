use nutrigraph::config::NutriGraphConfig;
use nutrigraph::graph::{EdgeKind, GraphSettings, NodeKind};
use nutrigraph::replay::{replay_file, ReplaySummary};
use std::io::Write;

fn events_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const WEEK: &str = r#"{"events": [
    {"type": "meal", "ingredients": ["Avocado", "Tomato", "Cucumber"],
     "nutrients": {"Avocado": ["Healthy Fats", "Fiber"]},
     "timestamp": "2025-10-04T12:00:00", "photo_ref": "salad.jpg"},
    {"type": "symptoms", "symptoms": ["High Energy", "Good Mood"], "sentiment": "positive",
     "severity": "high", "timestamp": "2025-10-04T13:00:00Z"},
    {"type": "symptoms", "symptoms": ["Bloated"], "sentiment": "negative",
     "timestamp": "2025-10-05T09:30:00+02:00"},
    {"type": "meal", "ingredients": ["Milk", "Cereal"], "timestamp": "2025-10-05T06:00:00"}
]}"#;

#[test]
fn replay_builds_linked_graph() {
    let file = events_file(WEEK);
    let (graph, summary) = replay_file(file.path(), GraphSettings::default()).unwrap();
    assert_eq!(summary, ReplaySummary { meals: 2, logs: 3 });

    let stats = graph.stats();
    assert_eq!(stats.nodes(NodeKind::Meal), 2);
    assert_eq!(stats.nodes(NodeKind::Symptom), 3);
    // 12:00 meal → both 13:00 logs; 06:00 UTC meal → 07:30 UTC bloated log
    assert_eq!(stats.edges(EdgeKind::LoggedNear), 3);

    let bloated = graph.query_ingredients_for_symptom("bloated");
    let names: Vec<&str> = bloated.iter().map(|c| c.ingredient.as_str()).collect();
    assert_eq!(names, vec!["Cereal", "Milk"]);
}

#[test]
fn configured_window_applies_to_replay() {
    let file = events_file(WEEK);
    let mut config = NutriGraphConfig::default();
    config.correlation.window_minutes = 30;
    let (graph, _) = replay_file(file.path(), config.correlation.graph_settings().unwrap()).unwrap();
    assert_eq!(graph.stats().edges(EdgeKind::LoggedNear), 0);
}

#[test]
fn malformed_files_are_rejected() {
    let not_json = events_file("meal at noon");
    assert!(replay_file(not_json.path(), GraphSettings::default()).is_err());

    let bad_time = events_file(
        r#"{"events": [{"type": "meal", "ingredients": ["Avocado"], "timestamp": "noon"}]}"#,
    );
    let err = replay_file(bad_time.path(), GraphSettings::default()).unwrap_err();
    assert!(format!("{err:#}").contains("malformed timestamp"));

    let missing = std::path::Path::new("/nonexistent/events.json");
    assert!(replay_file(missing, GraphSettings::default()).is_err());
}
