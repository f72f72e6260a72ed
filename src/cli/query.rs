use anyhow::Result;
use std::path::Path;

use crate::config::NutriGraphConfig;
use crate::insight::InsightContext;

/// Rank the ingredients eaten before `symptom` and print them with their nutrients.
pub fn query(
    config: &NutriGraphConfig,
    events: &Path,
    symptom: &str,
    limit: Option<usize>,
) -> Result<()> {
    anyhow::ensure!(!symptom.trim().is_empty(), "symptom must not be empty");

    let graph = super::load_graph(config, events)?;
    let top_n = limit.unwrap_or(config.insight.top_n).max(1);
    let ctx = InsightContext::build(&graph, symptom, top_n);

    println!("Symptom: {} (logged {} time(s))", ctx.symptom, ctx.frequency);
    println!("{}", "=".repeat(40));

    if !ctx.has_data() {
        println!("{}", ctx.no_data_message());
        return Ok(());
    }

    for (i, c) in ctx.correlated.iter().enumerate() {
        println!("{}. {:<24} {}", i + 1, c.ingredient, c.count);
        if !c.nutrients.is_empty() {
            println!("   nutrients: {}", c.nutrients.join(", "));
        }
    }
    println!();
    println!("Confidence: {:?}", ctx.confidence);

    Ok(())
}
