pub mod export;
pub mod query;
pub mod stats;

use anyhow::Result;
use std::path::Path;

use crate::config::NutriGraphConfig;
use crate::graph::GraphStore;

/// Rebuild a graph from an events file using the configured windows.
pub fn load_graph(config: &NutriGraphConfig, events: &Path) -> Result<GraphStore> {
    let (graph, summary) =
        crate::replay::replay_file(events, config.correlation.graph_settings()?)?;
    eprintln!(
        "Replayed {} meals and {} symptom logs from {}.",
        summary.meals,
        summary.logs,
        events.display()
    );
    Ok(graph)
}
