//! Error types for the prediction pipeline.
//!
//! Every error aborts the whole request: there is no retry and no partial result.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type PredictionResult<T> = Result<T, PredictionError>;

/// Errors that can occur while encoding, predicting or rendering.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Input outside the closed region set, or an unparsable date.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model artifact missing, corrupt or unreadable.
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// Model does not accept the (region_code, relative_day) feature shape.
    #[error("Model schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Model produced a value that cannot be turned into a passenger count.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Encoding a model artifact or result table failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Chart rendering failed.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PredictionError {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a model load error.
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }

    /// Create an inference error.
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Check if the error was caused by what the user submitted.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if the error comes from the model artifact itself.
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            Self::ModelLoad(_) | Self::SchemaMismatch(_) | Self::Inference(_)
        )
    }
}

impl From<csv::Error> for PredictionError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            PredictionError::Io(std::io::Error::other(err))
        } else {
            PredictionError::Serialization(err.to_string())
        }
    }
}
