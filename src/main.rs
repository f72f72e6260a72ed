mod cli;
mod config;
mod graph;
mod insight;
mod intake;
mod replay;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nutrigraph", version, about = "Meal and symptom knowledge graph MCP server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport)
    Serve {
        /// Seed the graph from a JSON events file before serving
        #[arg(long)]
        events: Option<PathBuf>,
    },
    /// Replay an events file and print node/edge counts
    Stats {
        /// JSON events file
        events: PathBuf,
    },
    /// Replay an events file and rank ingredients for a symptom
    Query {
        /// JSON events file
        events: PathBuf,
        /// Symptom name, e.g. "High Energy"
        symptom: String,
        /// Maximum ingredients to show (defaults to insight.top_n)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Replay an events file and print every node and edge as JSON
    Export {
        /// JSON events file
        events: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::NutriGraphConfig::load()?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { events: None } => {
            server::serve_stdio(config).await?;
        }
        Command::Serve {
            events: Some(events),
        } => {
            let graph = cli::load_graph(&config, &events)?;
            server::serve_stdio_with(config, graph::SharedGraph::new(graph)).await?;
        }
        Command::Stats { events } => {
            cli::stats::stats(&config, &events)?;
        }
        Command::Query {
            events,
            symptom,
            limit,
        } => {
            cli::query::query(&config, &events, &symptom, limit)?;
        }
        Command::Export { events } => {
            cli::export::export(&config, &events)?;
        }
    }

    Ok(())
}
