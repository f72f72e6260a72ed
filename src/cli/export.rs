use anyhow::Result;
use std::path::Path;

use crate::config::NutriGraphConfig;

/// Export all nodes and edges as JSON to stdout.
pub fn export(config: &NutriGraphConfig, events: &Path) -> Result<()> {
    let graph = super::load_graph(config, events)?;
    let snapshot = graph.snapshot();

    let json = serde_json::to_string_pretty(&snapshot)?;
    println!("{json}");

    eprintln!(
        "Exported {} nodes and {} edges.",
        snapshot.nodes.len(),
        snapshot.edges.len()
    );

    Ok(())
}
