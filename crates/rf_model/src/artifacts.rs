//! Persisted training artifacts: model, metadata bundle, metrics bundle.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use recording_structs::ModelMetrics;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::LabelEncoder;
use crate::forest::RandomForest;

/// Metadata bundle saved alongside the model.
///
/// Carries the encoders fit at training time (the only ones valid for
/// inference against this model), the species lookup, and a snapshot of the
/// training metrics. The metrics also live in their own file; the snapshot
/// here is kept for parity with it rather than being authoritative.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelMetadata {
    /// Encoder for species English names
    pub species_encoder: LabelEncoder,

    /// Encoder for country names
    pub country_encoder: LabelEncoder,

    /// Encoder for season names
    pub season_encoder: LabelEncoder,

    /// Encoded species index to display name, over the model's classes
    pub species_lookup: BTreeMap<usize, String>,

    /// Snapshot of the training-time metrics
    pub metrics: ModelMetrics,

    /// When the model was trained
    pub trained_at: DateTime<Utc>,
}

fn save_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let data =
        serde_json::to_string(value).with_context(|| format!("Failed to serialize {what}"))?;

    std::fs::write(path, data)
        .with_context(|| format!("Failed to write {what} to {}", path.display()))
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} from {}", path.display()))?;

    serde_json::from_str(&data).with_context(|| format!("Failed to parse {what}"))
}

/// Saves the fitted forest.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_model(path: &Path, model: &RandomForest) -> Result<()> {
    save_json(path, model, "model")
}

/// Loads a fitted forest.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub fn load_model(path: &Path) -> Result<RandomForest> {
    load_json(path, "model")
}

/// Saves the metadata bundle.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_metadata(path: &Path, metadata: &ModelMetadata) -> Result<()> {
    save_json(path, metadata, "model metadata")
}

/// Loads the metadata bundle.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub fn load_metadata(path: &Path) -> Result<ModelMetadata> {
    load_json(path, "model metadata")
}

/// Saves the standalone metrics bundle.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_metrics(path: &Path, metrics: &ModelMetrics) -> Result<()> {
    save_json(path, metrics, "model metrics")
}

/// Loads the standalone metrics bundle.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub fn load_metrics(path: &Path) -> Result<ModelMetrics> {
    load_json(path, "model metrics")
}
