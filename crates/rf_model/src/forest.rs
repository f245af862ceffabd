//! Bagged random-forest classifier.

use serde::{Deserialize, Serialize};

use crate::rng::Lcg;
use crate::tree::DecisionTree;

/// Configuration for fitting a random forest.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Minimum rows required to attempt a split.
    pub min_samples_split: usize,
    /// Seed for bootstrap and feature sampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 500,
            min_samples_split: 2,
            seed: 123,
        }
    }
}

/// A random-forest classifier over encoded categorical features.
///
/// `classes` holds the encoded labels the forest predicts over, sorted
/// ascending; `predict_proba` output is aligned with it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    classes: Vec<usize>,
    config: ForestConfig,
}

impl RandomForest {
    /// Fits the forest on the full training set.
    ///
    /// `y` holds encoded labels; they need not be contiguous. Each tree is
    /// grown on a bootstrap sample, considering `sqrt(n_features)` features
    /// per split.
    #[must_use]
    pub fn fit(x: &[Vec<f64>], y: &[usize], config: ForestConfig) -> Self {
        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        // Map encoded labels to positions in the class list
        let positions: Vec<usize> = y
            .iter()
            .map(|label| {
                classes
                    .binary_search(label)
                    .unwrap_or_else(|_| unreachable!("label taken from y"))
            })
            .collect();

        let n_features = x.first().map_or(0, Vec::len);
        let max_features = ((n_features as f64).sqrt().floor() as usize).max(1);

        let mut rng = Lcg::new(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            let indices: Vec<usize> = (0..x.len()).map(|_| rng.next_below(x.len())).collect();

            trees.push(DecisionTree::fit(
                x,
                &positions,
                &indices,
                classes.len(),
                max_features,
                config.min_samples_split,
                &mut rng,
            ));
        }

        Self {
            trees,
            classes,
            config,
        }
    }

    /// Returns the class probability distribution for one row, averaged
    /// over all trees and aligned with [`Self::classes`].
    #[must_use]
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let mut probs = vec![0.0; self.classes.len()];

        for tree in &self.trees {
            for (acc, p) in probs.iter_mut().zip(tree.predict_proba(row)) {
                *acc += p;
            }
        }

        let n = self.trees.len() as f64;
        for p in &mut probs {
            *p /= n;
        }

        probs
    }

    /// Returns the encoded label with the highest probability for one row.
    #[must_use]
    pub fn predict(&self, row: &[f64]) -> usize {
        let probs = self.predict_proba(row);

        let best = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map_or(0, |(i, _)| i);

        self.classes[best]
    }

    /// The encoded labels this forest predicts over, sorted ascending.
    #[must_use]
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// The configuration the forest was fit with.
    #[must_use]
    pub const fn config(&self) -> &ForestConfig {
        &self.config
    }
}
