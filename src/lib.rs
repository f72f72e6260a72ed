//! NutriGraph: a meal/symptom knowledge graph.
//!
//! Meals are broken down into ingredients and nutrients; free-form symptom logs are
//! linked to every meal eaten shortly before them. Querying a symptom then ranks the
//! ingredients that most often preceded it.
//!
//! | Node | Identity | Edges out |
//! |------|----------|-----------|
//! | **Meal** | one per logged meal | `CONTAINS` → Ingredient, `LOGGED_NEAR` → UserLog |
//! | **Ingredient** | normalized name | `HAS_NUTRIENT` → Nutrient |
//! | **Nutrient** | normalized name | |
//! | **UserLog** | one per logged symptom | `EXPERIENCED` → Symptom |
//! | **Symptom** | normalized name | |
//!
//! # Architecture
//!
//! - **Storage**: in-process arena graph, rebuilt on start (no persistence)
//! - **Correlation**: symptom → logs → meals within the window → ingredients, counted
//! - **Transport**: MCP over stdio, plus a CLI that replays a JSON events file
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`graph`]: The graph store, its queries, stats, and export
//! - [`intake`]: Validation of vision/text model replies before they reach the graph
//! - [`insight`]: Context and prompt for the insight-synthesis model
//! - [`replay`]: Rebuilding a graph from a JSON events file

pub mod config;
pub mod graph;
pub mod insight;
pub mod intake;
pub mod replay;
