//! Tree ensembles exported as flat node arrays.
//!
//! Node `i` is a leaf when `left[i] < 0`; otherwise samples with
//! `x[feature[i]] <= threshold[i]` go to `left[i]`, the rest to `right[i]`.
//! Children always have a larger index than their parent.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, PredictionResult};
use crate::model::{check_input, Regressor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub n_features: usize,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    /// Single-leaf tree that always predicts `value`.
    pub fn constant(n_features: usize, value: f64) -> Self {
        RegressionTree {
            n_features,
            feature: vec![-1],
            threshold: vec![0.0],
            left: vec![-1],
            right: vec![-1],
            value: vec![value],
        }
    }

    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Checks array lengths, child links and split features.
    pub fn validate(&self) -> PredictionResult<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(PredictionError::model_load("regression tree has no nodes"));
        }
        if [self.feature.len(), self.threshold.len(), self.left.len(), self.right.len()]
            .iter()
            .any(|len| *len != n)
        {
            return Err(PredictionError::model_load(
                "regression tree node arrays have different lengths",
            ));
        }
        for i in 0..n {
            if self.left[i] < 0 {
                continue;
            }
            for child in [self.left[i], self.right[i]] {
                if child as usize <= i || child as usize >= n {
                    return Err(PredictionError::model_load(format!(
                        "node {} links to invalid child {}",
                        i, child
                    )));
                }
            }
            let feature = self.feature[i];
            if feature < 0 || feature as usize >= self.n_features {
                return Err(PredictionError::schema_mismatch(format!(
                    "node {} splits on feature {} but the tree declares {} features",
                    i, feature, self.n_features
                )));
            }
        }
        Ok(())
    }

    /// Walks one row to its leaf.
    ///
    /// Links are bounds-checked as they are followed, so a malformed tree
    /// built in memory fails instead of panicking or looping.
    fn predict_row(&self, row: ArrayView1<f64>) -> PredictionResult<f64> {
        let malformed = |node: usize| {
            PredictionError::model_load(format!("regression tree is malformed at node {}", node))
        };
        let mut node = 0;
        loop {
            let left = *self.left.get(node).ok_or_else(|| malformed(node))?;
            if left < 0 {
                return self.value.get(node).copied().ok_or_else(|| malformed(node));
            }
            let feature = *self.feature.get(node).ok_or_else(|| malformed(node))?;
            let threshold = *self.threshold.get(node).ok_or_else(|| malformed(node))?;
            let x = usize::try_from(feature)
                .ok()
                .and_then(|f| row.get(f))
                .ok_or_else(|| malformed(node))?;
            let next = if *x <= threshold {
                left
            } else {
                *self.right.get(node).ok_or_else(|| malformed(node))?
            };
            if next <= node as i64 {
                return Err(malformed(node));
            }
            node = next as usize;
        }
    }
}

impl Regressor for RegressionTree {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Array2<f64>) -> PredictionResult<Vec<f64>> {
        check_input(self, features)?;
        features.rows().into_iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Averages the output of its trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> PredictionResult<()> {
        if self.trees.is_empty() {
            return Err(PredictionError::model_load("random forest has no trees"));
        }
        for tree in &self.trees {
            if tree.n_features != self.n_features {
                return Err(PredictionError::schema_mismatch(format!(
                    "forest declares {} features but a tree declares {}",
                    self.n_features, tree.n_features
                )));
            }
            tree.validate()?;
        }
        Ok(())
    }
}

impl Regressor for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &Array2<f64>) -> PredictionResult<Vec<f64>> {
        check_input(self, features)?;
        if self.trees.is_empty() {
            return Err(PredictionError::model_load("random forest has no trees"));
        }
        let scale = 1.0 / self.trees.len() as f64;
        features
            .rows()
            .into_iter()
            .map(|row| -> PredictionResult<f64> {
                let mut total = 0.0;
                for tree in &self.trees {
                    total += tree.predict_row(row)?;
                }
                Ok(total * scale)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // Splits on relative_day <= 100, then on region_code <= 0.5 for the left branch.
    fn stump() -> RegressionTree {
        RegressionTree {
            n_features: 2,
            feature: vec![1, 0, -2, -2, -2],
            threshold: vec![100.0, 0.5, -2.0, -2.0, -2.0],
            left: vec![1, 2, -1, -1, -1],
            right: vec![4, 3, -1, -1, -1],
            value: vec![0.0, 0.0, 10.0, 20.0, 30.0],
        }
    }

    #[test]
    fn walks_to_leaf() {
        let tree = stump();
        let out = tree
            .predict(&array![[0.0, 50.0], [1.0, 100.0], [3.0, 101.0]])
            .unwrap();
        assert_eq!(out, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn forest_averages_trees() {
        let forest = RandomForest {
            n_features: 2,
            trees: vec![stump(), RegressionTree::constant(2, 40.0)],
        };
        let out = forest.predict(&array![[0.0, 50.0], [3.0, 500.0]]).unwrap();
        assert_eq!(out, vec![25.0, 35.0]);
    }

    #[test]
    fn rejects_backward_child_links() {
        let mut tree = stump();
        tree.left[1] = 0;
        assert!(matches!(tree.validate(), Err(PredictionError::ModelLoad(_))));
    }

    #[test]
    fn rejects_split_on_unknown_feature() {
        let mut tree = stump();
        tree.feature[0] = 2;
        assert!(matches!(tree.validate(), Err(PredictionError::SchemaMismatch(_))));
    }

    #[test]
    fn prediction_skips_unreachable_nodes() {
        // Node 5 is never visited, so only load-time validation notices it.
        let mut tree = stump();
        tree.feature.push(0);
        tree.threshold.push(0.0);
        tree.left.push(0);
        tree.right.push(0);
        tree.value.push(0.0);
        assert!(tree.validate().is_err());
        assert_eq!(tree.predict(&array![[0.0, 50.0]]).unwrap(), vec![10.0]);
    }

    #[test]
    fn malformed_links_fail_without_panicking() {
        let mut tree = stump();
        tree.right[0] = 99;
        let err = tree.predict(&array![[0.0, 500.0]]).unwrap_err();
        assert!(matches!(err, PredictionError::ModelLoad(_)));

        let mut cyclic = stump();
        cyclic.left[1] = 0;
        assert!(cyclic.predict(&array![[0.0, 50.0]]).is_err());
    }

    #[test]
    fn empty_forest_is_a_load_error() {
        let forest = RandomForest { n_features: 2, trees: vec![] };
        assert!(matches!(forest.validate(), Err(PredictionError::ModelLoad(_))));
    }
}
