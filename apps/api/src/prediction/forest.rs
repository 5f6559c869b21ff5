//! Bagged regression-tree ensemble.
//!
//! CART trees with variance (MSE) splits over every feature, each grown on a
//! bootstrap sample. Deterministic for a given seed.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

struct TreeBuilder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [f64],
    params: ForestParams,
    nodes: Vec<Node>,
    /// Weighted impurity decrease per feature.
    importance: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

fn sse(sum: f64, sum_sq: f64, n: f64) -> f64 {
    (sum_sq - sum * sum / n).max(0.0)
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, samples: &mut [usize], depth: usize) -> usize {
        let n = samples.len() as f64;
        let sum: f64 = samples.iter().map(|&i| self.y[i]).sum();
        let mean = sum / n;

        let split = if depth < self.params.max_depth && samples.len() >= self.params.min_samples_split {
            self.best_split(samples)
        } else {
            None
        };

        let Some(split) = split else {
            self.nodes.push(Node::Leaf { value: mean });
            return self.nodes.len() - 1;
        };

        self.importance[split.feature] += split.gain;

        // Reserve the slot so children get later indices.
        let idx = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });

        let (feature, threshold) = (split.feature, split.threshold);
        let x = self.x;
        samples.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));
        let mid = samples.partition_point(|&i| x[i][feature] <= threshold);
        let (left_samples, right_samples) = samples.split_at_mut(mid);

        let left = self.build(left_samples, depth + 1);
        let right = self.build(right_samples, depth + 1);
        self.nodes[idx] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        idx
    }

    fn best_split(&self, samples: &[usize]) -> Option<BestSplit> {
        let n = samples.len();
        let total_sum: f64 = samples.iter().map(|&i| self.y[i]).sum();
        let total_sq: f64 = samples.iter().map(|&i| self.y[i] * self.y[i]).sum();
        let parent = sse(total_sum, total_sq, n as f64);
        let width = self.x.first().map(Vec::len).unwrap_or(0);

        let mut best: Option<BestSplit> = None;
        let mut order: Vec<usize> = samples.to_vec();

        for feature in 0..width {
            order.sort_by(|&a, &b| self.x[a][feature].total_cmp(&self.x[b][feature]));

            let (mut left_sum, mut left_sq) = (0.0, 0.0);
            for k in 0..n - 1 {
                let yi = self.y[order[k]];
                left_sum += yi;
                left_sq += yi * yi;

                let here = self.x[order[k]][feature];
                let next = self.x[order[k + 1]][feature];
                if next <= here {
                    continue;
                }

                let nl = (k + 1) as f64;
                let nr = (n - k - 1) as f64;
                let children = sse(left_sum, left_sq, nl)
                    + sse(total_sum - left_sum, total_sq - left_sq, nr);
                let gain = parent - children;

                if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (here + next) / 2.0,
                        gain,
                    });
                }
            }
        }
        best
    }
}

impl RegressionTree {
    fn fit(x: &[Vec<f64>], y: &[f64], samples: &mut [usize], params: ForestParams) -> (Self, Vec<f64>) {
        let width = x.first().map(Vec::len).unwrap_or(0);
        let mut builder = TreeBuilder {
            x,
            y,
            params,
            nodes: Vec::new(),
            importance: vec![0.0; width],
        };
        if !samples.is_empty() {
            builder.build(samples, 0);
        }
        (
            RegressionTree {
                nodes: builder.nodes,
            },
            builder.importance,
        )
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = row.get(*feature).copied().unwrap_or(0.0);
                    idx = if v <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    /// Normalised impurity importance, one entry per feature column.
    feature_importance: Vec<f64>,
}

impl RandomForest {
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: ForestParams) -> Self {
        let n = x.len();
        let width = x.first().map(Vec::len).unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);
        let mut importance = vec![0.0; width];

        for _ in 0..params.n_trees {
            let mut samples: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n.max(1))).collect();
            if n == 0 {
                samples.clear();
            }
            let (tree, tree_importance) = RegressionTree::fit(x, y, &mut samples, params);

            // Each tree's importances sum to 1 before averaging.
            let total: f64 = tree_importance.iter().sum();
            if total > 0.0 {
                for (acc, v) in importance.iter_mut().zip(&tree_importance) {
                    *acc += v / total;
                }
            }
            trees.push(tree);
        }

        let total: f64 = importance.iter().sum();
        if total > 0.0 {
            importance.iter_mut().for_each(|v| *v /= total);
        }

        Self {
            trees,
            feature_importance: importance,
        }
    }

    pub fn tree_predictions(&self, row: &[f64]) -> Vec<f64> {
        self.trees.iter().map(|t| t.predict(row)).collect()
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        mean(&self.tree_predictions(row))
    }

    pub fn feature_importance(&self) -> &[f64] {
        &self.feature_importance
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>())
}

/// Coefficient of determination of `predicted` against `actual`.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    let m = mean(actual);
    let ss_tot: f64 = actual.iter().map(|a| (a - m).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        // y depends only on column 0; column 1 is noise-free filler
        let x: Vec<Vec<f64>> = (0..60).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let y: Vec<f64> = (0..60).map(|i| if i < 30 { 2.0 } else { 8.0 }).collect();
        (x, y)
    }

    #[test]
    fn test_single_tree_learns_step() {
        let (x, y) = step_data();
        let mut samples: Vec<usize> = (0..x.len()).collect();
        let (tree, importance) = RegressionTree::fit(&x, &y, &mut samples, ForestParams::default());
        assert_eq!(tree.predict(&[5.0, 0.0]), 2.0);
        assert_eq!(tree.predict(&[50.0, 0.0]), 8.0);
        assert!(importance[0] > 0.0);
        assert_eq!(importance[1], 0.0);
    }

    #[test]
    fn test_forest_is_deterministic_and_accurate() {
        let (x, y) = step_data();
        let params = ForestParams {
            n_trees: 20,
            ..ForestParams::default()
        };
        let a = RandomForest::fit(&x, &y, params);
        let b = RandomForest::fit(&x, &y, params);
        assert_eq!(a, b);
        assert_eq!(a.n_trees(), 20);

        let predicted: Vec<f64> = x.iter().map(|r| a.predict(r)).collect();
        assert!(r2_score(&y, &predicted) > 0.9);
        assert!(a.feature_importance()[0] > 0.9);
    }

    #[test]
    fn test_min_samples_split_stops_growth() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let y = vec![1.0, 1.0, 5.0, 5.0];
        let mut samples: Vec<usize> = (0..4).collect();
        let (tree, _) = RegressionTree::fit(&x, &y, &mut samples, ForestParams::default());
        assert_eq!(tree.predict(&[1.0]), 3.0, "four samples is below the split minimum");
    }

    #[test]
    fn test_variance_and_r2() {
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
        assert_eq!(r2_score(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 1.0);
        assert_eq!(r2_score(&[2.0, 2.0], &[1.0, 3.0]), 0.0);
    }
}
