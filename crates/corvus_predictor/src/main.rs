//! Corvus Species Predictor
//!
//! A machine learning-based service that predicts the most likely bird
//! species for a country and season, trained on crowd-sourced recording
//! metadata.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Corvus Species Predictor
#[derive(Parser)]
#[command(name = "corvus")]
#[command(about = "Random-forest species predictor over xeno-canto recording metadata")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recording metadata and build the cached dataset
    Ingest,

    /// Train the random-forest model on the cached dataset
    Train {
        /// Number of trees in the forest
        #[arg(short, long, default_value = "500")]
        trees: usize,
    },

    /// Serve the prediction API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Ingest => {
            commands::ingest::run().await?;
        }
        Commands::Train { trees } => {
            commands::train::run(trees)?;
        }
        Commands::Serve { port } => {
            commands::serve::run(port).await?;
        }
    }

    Ok(())
}
