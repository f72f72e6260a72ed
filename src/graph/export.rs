//! Bulk read-only export for visualization and the CLI `export` command.

use serde::Serialize;

use super::store::GraphStore;
use super::types::{Edge, Node};

/// Every node and edge at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphStore {
    /// Copies of all nodes, in id order.
    pub fn export_nodes(&self) -> Vec<Node> {
        self.iter_nodes()
            .map(|(id, data)| Node {
                id,
                data: data.clone(),
            })
            .collect()
    }

    /// Copies of all edges, in creation order.
    pub fn export_edges(&self) -> Vec<Edge> {
        self.iter_edges().copied().collect()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.export_nodes(),
            edges: self.export_edges(),
        }
    }
}
