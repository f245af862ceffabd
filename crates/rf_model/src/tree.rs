//! CART decision tree with gini splits.

use serde::{Deserialize, Serialize};

use crate::rng::Lcg;

/// A node in the tree, stored in a flat arena indexed by position.
#[derive(Debug, Clone, Deserialize, Serialize)]
enum Node {
    /// Internal split: rows with `feature <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Leaf holding the class probability distribution of its rows.
    Leaf { probs: Vec<f64> },
}

/// A single classification tree fit on a bootstrap sample.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

/// Split-search parameters shared by every node of one tree.
struct BuildContext<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    n_classes: usize,
    max_features: usize,
    min_samples_split: usize,
}

impl DecisionTree {
    /// Fits a tree on the rows selected by `indices`.
    ///
    /// `y` holds class positions in `0..n_classes`. `max_features` random
    /// features are considered at each split; `rng` drives that sampling.
    #[must_use]
    pub fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        indices: &[usize],
        n_classes: usize,
        max_features: usize,
        min_samples_split: usize,
        rng: &mut Lcg,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            n_classes,
        };

        let ctx = BuildContext {
            x,
            y,
            n_classes,
            max_features,
            min_samples_split,
        };

        let mut indices = indices.to_vec();
        tree.build(&ctx, &mut indices, rng);

        tree
    }

    /// Returns the class probability distribution for one row.
    #[must_use]
    pub fn predict_proba(&self, row: &[f64]) -> &[f64] {
        let mut node = 0;

        loop {
            match &self.nodes[node] {
                Node::Leaf { probs } => return probs,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Number of classes this tree distributes probability over.
    #[must_use]
    pub const fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Recursively grows the subtree for `indices`, returning its root index.
    fn build(&mut self, ctx: &BuildContext<'_>, indices: &mut [usize], rng: &mut Lcg) -> usize {
        let counts = class_counts(ctx.y, indices, ctx.n_classes);
        let node_gini = gini(&counts, indices.len());

        if indices.len() < ctx.min_samples_split || node_gini == 0.0 {
            return self.push_leaf(&counts, indices.len());
        }

        let Some((feature, threshold)) = best_split(ctx, indices, node_gini, rng) else {
            return self.push_leaf(&counts, indices.len());
        };

        // Partition in place: rows with feature <= threshold first
        let mut split_point = 0;
        for i in 0..indices.len() {
            if ctx.x[indices[i]][feature] <= threshold {
                indices.swap(i, split_point);
                split_point += 1;
            }
        }

        if split_point == 0 || split_point == indices.len() {
            return self.push_leaf(&counts, indices.len());
        }

        let node = self.nodes.len();
        self.nodes.push(Node::Split {
            feature,
            threshold,
            left: 0,
            right: 0,
        });

        let (left_indices, right_indices) = indices.split_at_mut(split_point);
        let left = self.build(ctx, left_indices, rng);
        let right = self.build(ctx, right_indices, rng);

        if let Node::Split {
            left: l, right: r, ..
        } = &mut self.nodes[node]
        {
            *l = left;
            *r = right;
        }

        node
    }

    /// Appends a leaf with the normalized class distribution of `counts`.
    fn push_leaf(&mut self, counts: &[usize], total: usize) -> usize {
        let probs = counts
            .iter()
            .map(|&c| {
                if total == 0 {
                    0.0
                } else {
                    c as f64 / total as f64
                }
            })
            .collect();

        self.nodes.push(Node::Leaf { probs });
        self.nodes.len() - 1
    }
}

/// Counts class occurrences among the selected rows.
fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
}

/// Gini impurity: 1 - sum(p_i^2).
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total as f64;
            p * p
        })
        .sum();

    1.0 - sum_sq
}

/// Searches a random subset of features for the impurity-minimizing split.
///
/// Returns `None` when no candidate split improves on the parent impurity.
fn best_split(
    ctx: &BuildContext<'_>,
    indices: &[usize],
    node_gini: f64,
    rng: &mut Lcg,
) -> Option<(usize, f64)> {
    let n_features = ctx.x.first().map_or(0, Vec::len);
    if n_features == 0 {
        return None;
    }

    let mut features: Vec<usize> = (0..n_features).collect();
    rng.shuffle(&mut features);
    features.truncate(ctx.max_features.clamp(1, n_features));

    let mut best: Option<(usize, f64, f64)> = None;

    for &feature in &features {
        let mut values: Vec<f64> = indices.iter().map(|&i| ctx.x[i][feature]).collect();
        values.sort_unstable_by(f64::total_cmp);
        values.dedup();

        for pair in values.windows(2) {
            let threshold = f64::midpoint(pair[0], pair[1]);
            let weighted = weighted_gini(ctx, indices, feature, threshold);

            let improves = best.is_none_or(|(_, _, g)| weighted < g);
            if weighted < node_gini && improves {
                best = Some((feature, threshold, weighted));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// Weighted gini impurity of the two children induced by a split.
fn weighted_gini(ctx: &BuildContext<'_>, indices: &[usize], feature: usize, threshold: f64) -> f64 {
    let mut left = vec![0usize; ctx.n_classes];
    let mut right = vec![0usize; ctx.n_classes];
    let mut n_left = 0usize;
    let mut n_right = 0usize;

    for &i in indices {
        if ctx.x[i][feature] <= threshold {
            left[ctx.y[i]] += 1;
            n_left += 1;
        } else {
            right[ctx.y[i]] += 1;
            n_right += 1;
        }
    }

    let total = (n_left + n_right) as f64;
    let left_gini = gini(&left, n_left);
    let right_gini = gini(&right, n_right);

    (n_left as f64 * left_gini + n_right as f64 * right_gini) / total
}
