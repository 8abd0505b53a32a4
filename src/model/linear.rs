use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::PredictionResult;
use crate::model::{check_input, Regressor};

/// Ordinary least squares fit: `y = x · coefficients + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        LinearRegressor {
            coefficients: Array1::from(coefficients),
            intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &Array2<f64>) -> PredictionResult<Vec<f64>> {
        check_input(self, features)?;
        let output = features.dot(&self.coefficients) + self.intercept;
        Ok(output.to_vec())
    }
}
