//! Regression models the pipeline can run.
//!
//! A trained model is anything implementing [`Regressor`]. Persisted artifacts
//! are a [`PersistedModel`]: a metadata header plus one [`ModelArtifact`]
//! variant per supported model family.

pub mod cache;
pub mod linear;
pub mod network;
pub mod tree;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::FEATURE_COUNT;
use crate::error::{PredictionError, PredictionResult};

pub use cache::ModelCache;
pub use linear::LinearRegressor;
pub use network::{DataStats, MlpRegressor};
pub use tree::{RandomForest, RegressionTree};

/// A fitted model mapping a feature table to one value per row.
pub trait Regressor: Send + Sync {
    /// Number of input columns the model was fit on.
    fn n_features(&self) -> usize;

    /// Predicts one value per row of `features`, in row order.
    fn predict(&self, features: &Array2<f64>) -> PredictionResult<Vec<f64>>;
}

/// Fails when `features` is not as wide as the model expects.
pub fn check_input<R: Regressor + ?Sized>(model: &R, features: &Array2<f64>) -> PredictionResult<()> {
    if features.ncols() != model.n_features() {
        return Err(PredictionError::schema_mismatch(format!(
            "model expects {} feature columns, got {}",
            model.n_features(),
            features.ncols()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelArtifact {
    Linear(LinearRegressor),
    Tree(RegressionTree),
    Forest(RandomForest),
    Mlp(MlpRegressor),
}

impl ModelArtifact {
    pub fn family(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::Tree(_) => "tree",
            ModelArtifact::Forest(_) => "forest",
            ModelArtifact::Mlp(_) => "mlp",
        }
    }

    fn inner(&self) -> &dyn Regressor {
        match self {
            ModelArtifact::Linear(m) => m,
            ModelArtifact::Tree(m) => m,
            ModelArtifact::Forest(m) => m,
            ModelArtifact::Mlp(m) => m,
        }
    }

    /// Structural checks that do not depend on input data.
    pub fn validate(&self) -> PredictionResult<()> {
        match self {
            ModelArtifact::Linear(_) => Ok(()),
            ModelArtifact::Tree(m) => m.validate(),
            ModelArtifact::Forest(m) => m.validate(),
            ModelArtifact::Mlp(m) => m.validate(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn predict(&self, features: &Array2<f64>) -> PredictionResult<Vec<f64>> {
        self.inner().predict(features)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub n_features: usize,
}

/// On-disk form of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedModel {
    pub metadata: ModelMetadata,
    pub model: ModelArtifact,
}

impl PersistedModel {
    pub fn new(name: impl Into<String>, model: ModelArtifact) -> Self {
        PersistedModel {
            metadata: ModelMetadata {
                name: name.into(),
                n_features: model.n_features(),
            },
            model,
        }
    }

    /// Checks the artifact is usable with the (region_code, relative_day) table.
    pub fn validate(&self) -> PredictionResult<()> {
        self.model.validate()?;
        let actual = self.model.n_features();
        if self.metadata.n_features != actual {
            return Err(PredictionError::schema_mismatch(format!(
                "metadata declares {} features but the {} model takes {}",
                self.metadata.n_features,
                self.model.family(),
                actual
            )));
        }
        if actual != FEATURE_COUNT {
            return Err(PredictionError::schema_mismatch(format!(
                "model '{}' takes {} features, expected {} (region_code, relative_day)",
                self.metadata.name, actual, FEATURE_COUNT
            )));
        }
        Ok(())
    }
}

impl Regressor for PersistedModel {
    fn n_features(&self) -> usize {
        self.model.n_features()
    }

    fn predict(&self, features: &Array2<f64>) -> PredictionResult<Vec<f64>> {
        self.model.predict(features)
    }
}
