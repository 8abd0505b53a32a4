use std::path::Path;

use tracing::{debug, info};

use crate::error::{PredictionError, PredictionResult};
use crate::model::PersistedModel;

/// Artifacts ending in `.json` are JSON, everything else is bincode.
pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

pub fn save_model(path: &Path, model: &PersistedModel) -> PredictionResult<()> {
    let model_data = if is_json(path) {
        serde_json::to_vec_pretty(model)
            .map_err(|e| PredictionError::serialization(e.to_string()))?
    } else {
        bincode::serialize(model).map_err(|e| PredictionError::serialization(e.to_string()))?
    };
    std::fs::write(path, model_data)?;
    debug!(path = %path.display(), "model saved");
    Ok(())
}

/// Reads and validates a model artifact.
pub fn load_model(path: &Path) -> PredictionResult<PersistedModel> {
    let model_data = std::fs::read(path).map_err(|e| {
        PredictionError::model_load(format!("cannot read {}: {}", path.display(), e))
    })?;
    let model: PersistedModel = if is_json(path) {
        serde_json::from_slice(&model_data)
            .map_err(|e| PredictionError::model_load(format!("{}: {}", path.display(), e)))?
    } else {
        bincode::deserialize(&model_data)
            .map_err(|e| PredictionError::model_load(format!("{}: {}", path.display(), e)))?
    };
    model.validate()?;
    info!(
        path = %path.display(),
        name = %model.metadata.name,
        family = model.model.family(),
        "model loaded"
    );
    Ok(model)
}
