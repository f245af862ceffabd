//! xeno-canto recording metadata downloader.
//!
//! Fetches recording metadata for the fixed taxonomic query and caches the
//! derived dataset on disk.

use anyhow::Result;
use config::CONFIG;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("xeno-canto downloader starting");

    let records = xeno_canto_downloader::run(&CONFIG.cache_path()).await?;

    info!(rows = records.len(), "Ingestion complete");

    Ok(())
}
