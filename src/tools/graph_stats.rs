//! MCP read-only graph tool parameter definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `graph_stats` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GraphStatsParams {}

/// Parameters for the `list_symptoms` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListSymptomsParams {}

/// Parameters for the `export_graph` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportGraphParams {}
