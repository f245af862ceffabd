//! Stratified train/test splitting.

use std::collections::BTreeMap;

use crate::rng::Lcg;

/// Splits row indices into train and test sets, stratified by label.
///
/// Each label's rows are shuffled with the seeded generator and a
/// `test_fraction` share (at least one row, never all rows) is held out.
/// Labels are visited in sorted order so the result is deterministic for a
/// fixed seed.
#[must_use]
pub fn stratified_split(y: &[usize], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut by_label: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in y.iter().enumerate() {
        by_label.entry(label).or_default().push(i);
    }

    let mut rng = Lcg::new(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (_, mut indices) in by_label {
        rng.shuffle(&mut indices);

        let n_test = if indices.len() < 2 {
            0
        } else {
            ((indices.len() as f64 * test_fraction).round() as usize).clamp(1, indices.len() - 1)
        };

        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    (train, test)
}
