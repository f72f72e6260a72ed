use serde::Serialize;
use std::collections::BTreeMap;

use super::store::GraphStore;
use super::types::{EdgeKind, NodeKind};

/// Node and edge counts, broken down by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// One entry per [`NodeKind`], zero included.
    pub nodes_by_kind: BTreeMap<NodeKind, usize>,
    /// One entry per [`EdgeKind`], zero included.
    pub edges_by_kind: BTreeMap<EdgeKind, usize>,
    pub total_nodes: usize,
    pub total_edges: usize,
}

impl GraphStats {
    pub fn nodes(&self, kind: NodeKind) -> usize {
        self.nodes_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn edges(&self, kind: EdgeKind) -> usize {
        self.edges_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl GraphStore {
    /// Count nodes and edges per kind. Single pass, no side effects.
    pub fn stats(&self) -> GraphStats {
        let mut nodes_by_kind: BTreeMap<NodeKind, usize> =
            NodeKind::ALL.iter().map(|k| (*k, 0)).collect();
        for (_, data) in self.iter_nodes() {
            *nodes_by_kind.entry(data.kind()).or_default() += 1;
        }

        let mut edges_by_kind: BTreeMap<EdgeKind, usize> =
            EdgeKind::ALL.iter().map(|k| (*k, 0)).collect();
        for edge in self.iter_edges() {
            *edges_by_kind.entry(edge.kind).or_default() += 1;
        }

        GraphStats {
            nodes_by_kind,
            edges_by_kind,
            total_nodes: self.node_count(),
            total_edges: self.edge_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::Sentiment;
    use chrono::{TimeDelta, TimeZone, Utc};
    use std::collections::HashMap;

    #[test]
    fn test_empty_graph_stats() {
        let stats = GraphStore::default().stats();
        assert_eq!(stats.total_nodes, 0);
        assert_eq!(stats.total_edges, 0);
        assert_eq!(stats.nodes_by_kind.len(), NodeKind::ALL.len());
        assert_eq!(stats.edges_by_kind.len(), EdgeKind::ALL.len());
        assert_eq!(stats.nodes(NodeKind::Meal), 0);
    }

    #[test]
    fn test_stats_counts_by_kind() {
        let mut g = GraphStore::default();
        let t0 = Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap();
        let mut nutrients = HashMap::new();
        nutrients.insert("Avocado".to_string(), vec!["Fiber".to_string()]);

        g.add_meal(&["Avocado", "Tomato"], &nutrients, t0, None).unwrap();
        g.add_symptom_log(&["High Energy", "Good Mood"], Sentiment::Positive, t0 + TimeDelta::hours(2), None)
            .unwrap();

        let stats = g.stats();
        assert_eq!(stats.nodes(NodeKind::Meal), 1);
        assert_eq!(stats.nodes(NodeKind::Ingredient), 2);
        assert_eq!(stats.nodes(NodeKind::Nutrient), 1);
        assert_eq!(stats.nodes(NodeKind::UserLog), 2);
        assert_eq!(stats.nodes(NodeKind::Symptom), 2);
        assert_eq!(stats.edges(EdgeKind::Contains), 2);
        assert_eq!(stats.edges(EdgeKind::HasNutrient), 1);
        assert_eq!(stats.edges(EdgeKind::Experienced), 2);
        assert_eq!(stats.edges(EdgeKind::LoggedNear), 2);
        assert_eq!(stats.total_nodes, 8);
        assert_eq!(stats.total_edges, 7);
    }

    #[test]
    fn test_stats_serialize_kind_keys() {
        let json = serde_json::to_value(GraphStore::default().stats()).unwrap();
        assert_eq!(json["nodes_by_kind"]["user_log"], 0);
        assert_eq!(json["edges_by_kind"]["LOGGED_NEAR"], 0);
    }
}
