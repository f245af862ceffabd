//! Train command - fits the random forest and persists the artifacts.

use anyhow::{Context, Result};
use config::CONFIG;
use recording_structs::load_cached_dataset;
use rf_model::{ForestConfig, TrainingConfig, train_species_model};
use tracing::info;

/// Runs the train command.
///
/// # Errors
///
/// Returns an error if the cached dataset is missing or training fails.
pub fn run(trees: usize) -> Result<()> {
    let records = load_cached_dataset(&CONFIG.cache_path())
        .context("No cached dataset found. Run ingest first.")?;

    info!(rows = records.len(), "Loaded training data");

    let config = TrainingConfig {
        forest: ForestConfig {
            n_trees: trees,
            ..ForestConfig::default()
        },
        ..TrainingConfig::default()
    };

    let artifacts = train_species_model(&records, &config)?;

    rf_model::save_model(&CONFIG.model_path(), &artifacts.model)?;
    rf_model::save_metadata(&CONFIG.metadata_path(), &artifacts.metadata)?;
    rf_model::save_metrics(&CONFIG.metrics_path(), &artifacts.metadata.metrics)?;

    let metrics = &artifacts.metadata.metrics;
    info!(
        species = artifacts.model.classes().len(),
        accuracy = metrics.accuracy,
        kappa = metrics.kappa,
        ci_lower = metrics.ci_lower,
        ci_upper = metrics.ci_upper,
        "Training complete"
    );

    Ok(())
}
