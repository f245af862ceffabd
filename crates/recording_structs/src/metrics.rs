//! Evaluation metrics persisted at training time and served verbatim.

use serde::{Deserialize, Serialize};

/// One cell of the long-form confusion matrix.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfusionCell {
    /// True species name
    #[serde(rename = "Reference")]
    pub reference: String,

    /// Predicted species name
    #[serde(rename = "Prediction")]
    pub prediction: String,

    /// Number of test rows falling in this cell
    #[serde(rename = "Freq")]
    pub freq: u64,
}

/// Per-species classification statistics.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpeciesStats {
    /// Species name
    #[serde(rename = "Species")]
    pub species: String,

    /// Recall: true positives over all actual positives (0 when undefined)
    #[serde(rename = "Sensitivity")]
    pub sensitivity: f64,

    /// True negatives over all actual negatives (0 when undefined)
    #[serde(rename = "Specificity")]
    pub specificity: f64,
}

/// The full metrics bundle produced by a training run.
///
/// Written once at training time; the serving API reads it back from disk
/// on every `/metrics` request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelMetrics {
    /// Long-form confusion matrix over the trained species
    pub confusion_matrix: Vec<ConfusionCell>,

    /// Sensitivity and specificity per species
    pub species_stats: Vec<SpeciesStats>,

    /// Accuracy on the held-out test set
    pub accuracy: f64,

    /// Lower bound of the 95% Wilson interval on accuracy
    pub ci_lower: f64,

    /// Upper bound of the 95% Wilson interval on accuracy
    pub ci_upper: f64,

    /// No-information rate: frequency of the most common test class
    pub nir: f64,

    /// One-sided significance flag: 1.0 when accuracy does not beat the NIR
    pub p_value: f64,

    /// Cohen's kappa on the held-out test set
    pub kappa: f64,
}
