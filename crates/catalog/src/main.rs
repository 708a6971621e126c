//! Catalog Semantic Index - Entry Point

// Force-link catalog-providers so linkme registrations are included
extern crate catalog_providers;

use clap::Parser;

/// Command line interface for the catalog semantic index
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(about = "Catalog Semantic Index - embedding sync and similarity search")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Override the configured log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    catalog::run(cli.config.as_deref(), cli.log_level.as_deref()).await
}
