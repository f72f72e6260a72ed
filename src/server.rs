//! MCP server initialization for the stdio transport.

use crate::config::NutriGraphConfig;
use crate::graph::{GraphStore, SharedGraph};
use crate::tools::NutriGraphTools;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Start the MCP server over stdio transport with an empty graph.
pub async fn serve_stdio(config: NutriGraphConfig) -> Result<()> {
    let store = GraphStore::new(config.correlation.graph_settings()?);
    serve_stdio_with(config, SharedGraph::new(store)).await
}

/// Start the MCP server over stdio on an existing graph (e.g. one rebuilt by replay).
pub async fn serve_stdio_with(config: NutriGraphConfig, graph: SharedGraph) -> Result<()> {
    tracing::info!(
        window_minutes = config.correlation.window_minutes,
        "starting NutriGraph MCP server on stdio"
    );

    let tools = NutriGraphTools::new(graph, Arc::new(config));
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}
