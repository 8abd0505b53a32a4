//! Encoder → model → formatter, run once per request.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::{encode_features, feature_table, DateRange, Region};
use crate::error::PredictionResult;
use crate::model::{check_input, ModelCache, Regressor};
use crate::report::{format_predictions, PredictionOutput};
use crate::utils::io::load_model;

/// What the user submitted: one region and an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub region: Region,
    pub date_range: DateRange,
}

impl PredictionRequest {
    pub fn new(region: Region, start: NaiveDate, end: NaiveDate) -> Self {
        PredictionRequest {
            region,
            date_range: DateRange::new(start, end),
        }
    }
}

pub fn predict_passengers(
    request: &PredictionRequest,
    model: &dyn Regressor,
) -> PredictionResult<PredictionOutput> {
    let rows = encode_features(request.region, &request.date_range);
    if rows.is_empty() {
        info!(
            start = %request.date_range.start,
            end = %request.date_range.end,
            "date range is empty"
        );
        return Ok(PredictionOutput::default());
    }

    let table = feature_table(&rows);
    check_input(model, &table)?;
    debug!(rows = rows.len(), region = %request.region, "running model");

    let raw = model.predict(&table)?;
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date()).collect();
    let output = format_predictions(&dates, &raw)?;

    info!(days = output.len(), region = %request.region, "prediction complete");
    Ok(output)
}

/// Loads the artifact fresh, then predicts.
pub fn predict_from_artifact(
    request: &PredictionRequest,
    model_path: &Path,
) -> PredictionResult<PredictionOutput> {
    let model = load_model(model_path)?;
    predict_passengers(request, &model)
}

/// Like [`predict_from_artifact`] but reuses models already in `cache`.
pub fn predict_cached(
    request: &PredictionRequest,
    model_path: &Path,
    cache: &ModelCache,
) -> PredictionResult<PredictionOutput> {
    let model = cache.get_or_load(model_path)?;
    predict_passengers(request, model.as_ref())
}
