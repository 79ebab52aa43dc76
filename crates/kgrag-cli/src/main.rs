//! kgrag CLI
//!
//! Loads a knowledge graph from JSON, embeds it, and answers questions
//! grounded in it, printing each pipeline phase as it is published.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    kgrag_observability::init_tracing(&config.observability);

    match &cli.command {
        Commands::Ask(args) => commands::ask(config, args, cli.json).await,
        Commands::Inspect { graph } => commands::inspect(graph, cli.json),
    }
}
