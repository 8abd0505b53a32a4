use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, PredictionResult};
use crate::model::{check_input, Regressor};

/// Per-column standardisation applied before the first layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStats {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

/// Multi-layer perceptron regressor: ReLU hidden layers, identity output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpRegressor {
    pub weights: Vec<Array2<f64>>,
    pub biases: Vec<Array1<f64>>,
    pub stats: Option<DataStats>,
}

fn relu(x: &Array2<f64>) -> Array2<f64> {
    x.mapv(|v| if v > 0.0 { v } else { 0.0 })
}

impl MlpRegressor {
    pub fn validate(&self) -> PredictionResult<()> {
        if self.weights.is_empty() || self.weights.len() != self.biases.len() {
            return Err(PredictionError::model_load(format!(
                "network has {} weight matrices and {} bias vectors",
                self.weights.len(),
                self.biases.len()
            )));
        }
        for (i, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            if w.ncols() != b.len() {
                return Err(PredictionError::model_load(format!(
                    "layer {} has {} units but {} biases",
                    i,
                    w.ncols(),
                    b.len()
                )));
            }
            if i > 0 && self.weights[i - 1].ncols() != w.nrows() {
                return Err(PredictionError::model_load(format!(
                    "layer {} expects {} inputs, previous layer yields {}",
                    i,
                    w.nrows(),
                    self.weights[i - 1].ncols()
                )));
            }
        }
        if let Some(last) = self.weights.last() {
            if last.ncols() != 1 {
                return Err(PredictionError::schema_mismatch(format!(
                    "network has {} outputs, expected a single regression output",
                    last.ncols()
                )));
            }
        }
        if let Some(stats) = &self.stats {
            let n = self.n_features();
            if stats.mean.len() != n || stats.std.len() != n {
                return Err(PredictionError::schema_mismatch(format!(
                    "normalisation stats cover {} columns, network expects {}",
                    stats.mean.len(),
                    n
                )));
            }
        }
        Ok(())
    }

    /// Runs the layers in order.
    ///
    /// Only the shapes each step needs are checked; `validate` does the full
    /// structural check once at load.
    pub fn forward(&self, x: &Array2<f64>) -> PredictionResult<Array2<f64>> {
        let mut activation = match &self.stats {
            Some(stats) => {
                if stats.mean.len() != x.ncols() || stats.std.len() != x.ncols() {
                    return Err(PredictionError::schema_mismatch(format!(
                        "normalisation stats cover {} columns, input has {}",
                        stats.mean.len(),
                        x.ncols()
                    )));
                }
                let mean = stats.mean.view().insert_axis(Axis(0));
                let std = stats.std.view().insert_axis(Axis(0));
                (x - &mean) / &std
            }
            None => x.clone(),
        };

        let last = self.weights.len().saturating_sub(1);
        for (i, (w, b)) in self.weights.iter().zip(&self.biases).enumerate() {
            if activation.ncols() != w.nrows() || w.ncols() != b.len() {
                return Err(PredictionError::model_load(format!(
                    "layer {} does not fit its input or biases",
                    i
                )));
            }
            let z = activation.dot(w) + &b.view().insert_axis(Axis(0));
            activation = if i == last { z } else { relu(&z) };
        }
        Ok(activation)
    }
}

impl Regressor for MlpRegressor {
    fn n_features(&self) -> usize {
        self.weights.first().map(|w| w.nrows()).unwrap_or(0)
    }

    fn predict(&self, features: &Array2<f64>) -> PredictionResult<Vec<f64>> {
        check_input(self, features)?;
        if self.weights.is_empty() || self.weights.len() != self.biases.len() {
            return Err(PredictionError::model_load(format!(
                "network has {} weight matrices and {} bias vectors",
                self.weights.len(),
                self.biases.len()
            )));
        }
        let output = self.forward(features)?;
        if output.ncols() != 1 {
            return Err(PredictionError::schema_mismatch(format!(
                "network yields {} outputs per row, expected 1",
                output.ncols()
            )));
        }
        Ok(output.column(0).to_vec())
    }
}
