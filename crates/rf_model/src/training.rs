//! Training pipeline: encode, filter, split, fit, evaluate.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Utc;
use recording_structs::RecordingRecord;
use tracing::info;

use crate::artifacts::ModelMetadata;
use crate::encoder::LabelEncoder;
use crate::forest::{ForestConfig, RandomForest};
use crate::metrics::evaluate;
use crate::split::stratified_split;

/// Configuration for a training run.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Forest parameters (tree count, split minimum, fit seed).
    pub forest: ForestConfig,
    /// Minimum observations a species needs to be trained on.
    pub min_species_count: usize,
    /// Share of each species held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the stratified train/test split.
    pub split_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            min_species_count: 10,
            test_fraction: 0.25,
            split_seed: 42,
        }
    }
}

/// Everything a training run produces.
#[derive(Debug, Clone)]
pub struct TrainedArtifacts {
    /// The fitted forest
    pub model: RandomForest,
    /// Encoders, lookup, and metrics snapshot
    pub metadata: ModelMetadata,
}

/// Trains the species model from the cached ingestion dataset.
///
/// Rows missing country, season, or species are dropped, the three
/// categorical fields are label-encoded, species with fewer than
/// `min_species_count` observations are removed, and a stratified split
/// feeds the forest fit and the held-out evaluation.
///
/// # Errors
///
/// Returns an error if no trainable rows remain after filtering.
pub fn train_species_model(
    records: &[RecordingRecord],
    config: &TrainingConfig,
) -> Result<TrainedArtifacts> {
    // Drop rows missing any of the three fields
    let rows: Vec<(&str, &str, &str)> = records
        .iter()
        .filter_map(|r| {
            let season = r.season?;
            if r.cnt.is_empty() || r.en.is_empty() {
                return None;
            }
            Some((r.cnt.as_str(), season.as_str(), r.en.as_str()))
        })
        .collect();

    if rows.is_empty() {
        anyhow::bail!("No training data found. Run ingestion first.");
    }

    // Label-encode all three categorical fields
    let species_encoder = LabelEncoder::fit(rows.iter().map(|(_, _, en)| *en));
    let country_encoder = LabelEncoder::fit(rows.iter().map(|(cnt, _, _)| *cnt));
    let season_encoder = LabelEncoder::fit(rows.iter().map(|(_, season, _)| *season));

    let encoded: Vec<(usize, usize, usize)> = rows
        .iter()
        .map(|(cnt, season, en)| {
            let species = species_encoder
                .transform(en)
                .unwrap_or_else(|_| unreachable!("species taken from fit data"));
            let country = country_encoder
                .transform(cnt)
                .unwrap_or_else(|_| unreachable!("country taken from fit data"));
            let season = season_encoder
                .transform(season)
                .unwrap_or_else(|_| unreachable!("season taken from fit data"));
            (species, country, season)
        })
        .collect();

    // Remove rare species
    let mut species_counts: BTreeMap<usize, usize> = BTreeMap::new();
    for (species, _, _) in &encoded {
        *species_counts.entry(*species).or_default() += 1;
    }

    let filtered: Vec<(usize, usize, usize)> = encoded
        .into_iter()
        .filter(|(species, _, _)| species_counts[species] >= config.min_species_count)
        .collect();

    if filtered.is_empty() {
        anyhow::bail!(
            "No species with at least {} observations",
            config.min_species_count
        );
    }

    let x: Vec<Vec<f64>> = filtered
        .iter()
        .map(|(_, country, season)| vec![*country as f64, *season as f64])
        .collect();
    let y: Vec<usize> = filtered.iter().map(|(species, _, _)| *species).collect();

    info!(
        rows = y.len(),
        species = species_counts
            .values()
            .filter(|&&c| c >= config.min_species_count)
            .count(),
        "Training random forest"
    );

    // Stratified split, then fit on the training rows
    let (train_idx, test_idx) = stratified_split(&y, config.test_fraction, config.split_seed);

    let x_train: Vec<Vec<f64>> = train_idx.iter().map(|&i| x[i].clone()).collect();
    let y_train: Vec<usize> = train_idx.iter().map(|&i| y[i]).collect();

    let model = RandomForest::fit(&x_train, &y_train, config.forest.clone());

    // Species lookup over the model's classes
    let species_lookup: BTreeMap<usize, String> = model
        .classes()
        .iter()
        .map(|&class| {
            let name = species_encoder
                .inverse_transform(class)
                .unwrap_or_default()
                .to_string();
            (class, name)
        })
        .collect();

    // Evaluate on the held-out rows
    let y_true: Vec<usize> = test_idx.iter().map(|&i| y[i]).collect();
    let y_pred: Vec<usize> = test_idx.iter().map(|&i| model.predict(&x[i])).collect();

    let metrics = evaluate(&y_true, &y_pred, model.classes(), &species_lookup);

    info!(
        accuracy = metrics.accuracy,
        kappa = metrics.kappa,
        nir = metrics.nir,
        test_rows = y_true.len(),
        "Evaluation complete"
    );

    let metadata = ModelMetadata {
        species_encoder,
        country_encoder,
        season_encoder,
        species_lookup,
        metrics,
        trained_at: Utc::now(),
    };

    Ok(TrainedArtifacts { model, metadata })
}

#[cfg(test)]
mod tests {
    use recording_structs::Season;

    use super::*;

    fn record(cnt: &str, season: Season, en: &str) -> RecordingRecord {
        RecordingRecord {
            cnt: cnt.to_string(),
            date: "2020-01-01".to_string(),
            en: en.to_string(),
            season: Some(season),
        }
    }

    /// Two species, each tied to its own country, 20 rows apiece.
    fn separable_records() -> Vec<RecordingRecord> {
        let mut records = Vec::new();
        for _ in 0..20 {
            records.push(record("Finland", Season::Winter, "Hooded Crow"));
            records.push(record("Spain", Season::Summer, "Common Raven"));
        }
        records
    }

    fn quick_config() -> TrainingConfig {
        TrainingConfig {
            forest: ForestConfig {
                n_trees: 25,
                ..ForestConfig::default()
            },
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_trains_on_separable_data() {
        let artifacts =
            train_species_model(&separable_records(), &quick_config()).expect("train");

        assert!(artifacts.metadata.metrics.accuracy > 0.9);
        assert_eq!(artifacts.model.classes().len(), 2);
    }

    #[test]
    fn test_lookup_keys_match_model_classes() {
        let artifacts =
            train_species_model(&separable_records(), &quick_config()).expect("train");

        let lookup_keys: Vec<usize> = artifacts.metadata.species_lookup.keys().copied().collect();
        assert_eq!(lookup_keys, artifacts.model.classes());
    }

    #[test]
    fn test_rare_species_removed() {
        let mut records = separable_records();
        // Only 3 observations, below the minimum of 10
        for _ in 0..3 {
            records.push(record("Norway", Season::Fall, "Rook"));
        }

        let artifacts = train_species_model(&records, &quick_config()).expect("train");

        assert!(
            !artifacts
                .metadata
                .species_lookup
                .values()
                .any(|name| name == "Rook")
        );
    }

    #[test]
    fn test_rows_without_season_dropped() {
        let mut records = separable_records();
        records.push(RecordingRecord {
            cnt: "Chile".to_string(),
            date: "not a date".to_string(),
            en: "Chimango Caracara".to_string(),
            season: None,
        });

        let artifacts = train_species_model(&records, &quick_config()).expect("train");

        assert!(artifacts.metadata.country_encoder.transform("Chile").is_err());
    }

    #[test]
    fn test_empty_dataset_is_error() {
        assert!(train_species_model(&[], &quick_config()).is_err());
    }

    #[test]
    fn test_encoders_cover_prediction_inputs() {
        let artifacts =
            train_species_model(&separable_records(), &quick_config()).expect("train");

        let country = artifacts
            .metadata
            .country_encoder
            .transform("Finland")
            .expect("seen country");
        let season = artifacts
            .metadata
            .season_encoder
            .transform("Winter")
            .expect("seen season");

        let probs = artifacts
            .model
            .predict_proba(&[country as f64, season as f64]);
        let total: f64 = probs.iter().sum();

        assert!((total - 1.0).abs() < 1e-9);
    }
}
