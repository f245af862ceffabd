//! Classification metrics for the held-out test set.

use std::collections::BTreeMap;

use recording_structs::{ConfusionCell, ModelMetrics, SpeciesStats};

/// z for a two-sided 95% interval.
const Z_95: f64 = 1.959_963_984_540_054;

/// Fraction of predictions matching the truth.
#[must_use]
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();

    correct as f64 / y_true.len() as f64
}

/// No-information rate: the frequency of the most common true class.
#[must_use]
pub fn no_information_rate(y_true: &[usize]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &label in y_true {
        *counts.entry(label).or_default() += 1;
    }

    let max = counts.values().copied().max().unwrap_or(0);
    max as f64 / y_true.len() as f64
}

/// Cohen's kappa: agreement corrected for chance agreement.
///
/// Returns 0 when chance agreement is total (degenerate marginals).
#[must_use]
pub fn cohen_kappa(y_true: &[usize], y_pred: &[usize]) -> f64 {
    let n = y_true.len();
    if n == 0 {
        return 0.0;
    }

    let mut row_marginals: BTreeMap<usize, usize> = BTreeMap::new();
    let mut col_marginals: BTreeMap<usize, usize> = BTreeMap::new();
    for (&truth, &pred) in y_true.iter().zip(y_pred) {
        *row_marginals.entry(truth).or_default() += 1;
        *col_marginals.entry(pred).or_default() += 1;
    }

    let po = accuracy(y_true, y_pred);
    let pe: f64 = row_marginals
        .iter()
        .map(|(label, &rows)| {
            let cols = col_marginals.get(label).copied().unwrap_or(0);
            (rows as f64 / n as f64) * (cols as f64 / n as f64)
        })
        .sum();

    if (1.0 - pe).abs() < f64::EPSILON {
        return 0.0;
    }

    (po - pe) / (1.0 - pe)
}

/// 95% Wilson score interval for a binomial proportion.
#[must_use]
pub fn wilson_interval(p_hat: f64, n: usize) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }

    let n = n as f64;
    let z2 = Z_95 * Z_95;
    let denom = 1.0 + z2 / n;
    let center = (p_hat + z2 / (2.0 * n)) / denom;
    let half = Z_95 * (p_hat * (1.0 - p_hat) / n + z2 / (4.0 * n * n)).sqrt() / denom;

    (center - half, center + half)
}

/// Computes the full metrics bundle for a test set.
///
/// `classes` are the encoded labels the model predicts over, sorted
/// ascending; `species_lookup` maps them to display names. Every entry of
/// `y_true` and `y_pred` must appear in `classes`.
#[must_use]
pub fn evaluate(
    y_true: &[usize],
    y_pred: &[usize],
    classes: &[usize],
    species_lookup: &BTreeMap<usize, String>,
) -> ModelMetrics {
    let n = y_true.len();
    let k = classes.len();

    let position = |label: usize| -> usize {
        classes
            .binary_search(&label)
            .unwrap_or_else(|_| unreachable!("label outside model classes"))
    };

    // Square confusion counts, reference rows by prediction columns
    let mut counts = vec![vec![0u64; k]; k];
    for (&truth, &pred) in y_true.iter().zip(y_pred) {
        counts[position(truth)][position(pred)] += 1;
    }

    let name = |label: usize| -> String {
        species_lookup
            .get(&label)
            .cloned()
            .unwrap_or_else(|| label.to_string())
    };

    // Long-form confusion matrix
    let mut confusion_matrix = Vec::with_capacity(k * k);
    for (pred_pos, &pred_label) in classes.iter().enumerate() {
        for (ref_pos, &ref_label) in classes.iter().enumerate() {
            confusion_matrix.push(ConfusionCell {
                reference: name(ref_label),
                prediction: name(pred_label),
                freq: counts[ref_pos][pred_pos],
            });
        }
    }

    // Per-species sensitivity and specificity from one-vs-rest counts
    let mut species_stats = Vec::with_capacity(k);
    for (pos, &label) in classes.iter().enumerate() {
        let tp = counts[pos][pos];
        let row_sum: u64 = counts[pos].iter().sum();
        let col_sum: u64 = counts.iter().map(|row| row[pos]).sum();

        let fn_ = row_sum - tp;
        let fp = col_sum - tp;
        let tn = n as u64 - tp - fn_ - fp;

        let sensitivity = if tp + fn_ > 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };
        let specificity = if tn + fp > 0 {
            tn as f64 / (tn + fp) as f64
        } else {
            0.0
        };

        species_stats.push(SpeciesStats {
            species: name(label),
            sensitivity,
            specificity,
        });
    }

    let accuracy = accuracy(y_true, y_pred);
    let nir = no_information_rate(y_true);
    let p_value = if accuracy <= nir { 1.0 } else { 0.0 };
    let (ci_lower, ci_upper) = wilson_interval(accuracy, n);
    let kappa = cohen_kappa(y_true, y_pred);

    ModelMetrics {
        confusion_matrix,
        species_stats,
        accuracy,
        ci_lower,
        ci_upper,
        nir,
        p_value,
        kappa,
    }
}
