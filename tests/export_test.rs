mod helpers;

use helpers::{add_logs, add_meal_with_nutrients, ts};
use nutrigraph::graph::{EdgeKind, GraphStore, NodeData, NodeKind};

fn sample() -> GraphStore {
    let mut g = GraphStore::default();
    add_meal_with_nutrients(&mut g, &["Avocado", "Tomato"], &[("Avocado", &["Fiber"])], ts(12, 0));
    add_logs(&mut g, &["High Energy"], ts(13, 0));
    g
}

#[test]
fn export_matches_stats() {
    let g = sample();
    let snapshot = g.snapshot();
    let stats = g.stats();

    assert_eq!(snapshot.nodes.len(), stats.total_nodes);
    assert_eq!(snapshot.edges.len(), stats.total_edges);
    for kind in NodeKind::ALL {
        let exported = snapshot.nodes.iter().filter(|n| n.kind() == kind).count();
        assert_eq!(exported, stats.nodes(kind), "{kind:?}");
    }
    for kind in EdgeKind::ALL {
        let exported = snapshot.edges.iter().filter(|e| e.kind == kind).count();
        assert_eq!(exported, stats.edges(kind), "{kind:?}");
    }
}

#[test]
fn exported_edges_respect_endpoint_kinds() {
    let g = sample();
    for edge in g.export_edges() {
        let (source_kind, target_kind) = edge.kind.endpoints();
        assert_eq!(g.node(edge.source).map(NodeData::kind), Some(source_kind));
        assert_eq!(g.node(edge.target).map(NodeData::kind), Some(target_kind));
    }
}

#[test]
fn export_json_shape() {
    let g = sample();
    let json = serde_json::to_value(g.snapshot()).unwrap();

    let nodes = json["nodes"].as_array().unwrap();
    let meal = nodes.iter().find(|n| n["kind"] == "meal").unwrap();
    assert!(meal["timestamp"].is_string());
    assert!(meal["id"].is_u64());

    let log = nodes.iter().find(|n| n["kind"] == "user_log").unwrap();
    assert_eq!(log["symptom"], "High Energy");

    let edges = json["edges"].as_array().unwrap();
    assert!(edges.iter().any(|e| e["kind"] == "LOGGED_NEAR"));
    assert!(edges.iter().any(|e| e["kind"] == "HAS_NUTRIENT"));
}

#[test]
fn empty_graph_exports_nothing() {
    let g = GraphStore::default();
    let snapshot = g.snapshot();
    assert!(snapshot.nodes.is_empty());
    assert!(snapshot.edges.is_empty());
    assert_eq!(g.stats().total_nodes, 0);
    assert_eq!(g.stats().nodes(NodeKind::Symptom), 0);
}
