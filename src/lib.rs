//! Commuter passenger prediction for Indonesian regions.
//!
//! A request (region plus inclusive date range) is encoded into one
//! `(region_code, relative_day)` row per day, passed through a pre-trained
//! regression model, and shaped into a chart series and a display table.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use data::{DateRange, FeatureRow, Region};
pub use error::{PredictionError, PredictionResult};
pub use model::{ModelArtifact, ModelCache, PersistedModel, Regressor};
pub use pipeline::{predict_cached, predict_from_artifact, predict_passengers, PredictionRequest};
pub use report::{ChartPoint, PredictionOutput, PredictionRow, TableRow};
