use anyhow::Result;
use std::path::Path;

use crate::config::NutriGraphConfig;
use crate::graph::{EdgeKind, NodeKind};

/// Display graph statistics in the terminal.
pub fn stats(config: &NutriGraphConfig, events: &Path) -> Result<()> {
    let graph = super::load_graph(config, events)?;
    let stats = graph.stats();

    println!("Graph Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total nodes:         {}", stats.total_nodes);
    println!("  Total edges:         {}", stats.total_edges);
    println!();

    println!("Nodes by Kind:");
    for kind in NodeKind::ALL {
        println!("  {:<14} {}", kind.as_str(), stats.nodes(kind));
    }
    println!();

    println!("Edges by Kind:");
    for kind in EdgeKind::ALL {
        println!("  {:<14} {}", kind.as_str(), stats.edges(kind));
    }
    println!();

    let symptoms = graph.symptoms();
    if !symptoms.is_empty() {
        println!("Symptoms:");
        for s in &symptoms {
            println!("  {:<24} {}", s.name, s.frequency);
        }
    }

    Ok(())
}
