//! Ingest command - builds the cached recording dataset.

use anyhow::Result;
use config::CONFIG;
use tracing::info;

/// Runs the ingest command.
///
/// When the cache file already exists it is reused without touching the
/// network.
///
/// # Errors
///
/// Returns an error if ingestion fails.
pub async fn run() -> Result<()> {
    let records = xeno_canto_downloader::run(&CONFIG.cache_path()).await?;

    info!(
        rows = records.len(),
        cache = %CONFIG.cache_path().display(),
        "Dataset ready"
    );

    Ok(())
}
