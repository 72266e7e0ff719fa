//! Error types for the air quality predictor

use thiserror::Error;

/// Errors raised while loading artifacts or serving a prediction.
#[derive(Debug, Error)]
pub enum AqiError {
    /// Scaler or model artifact is missing, corrupt, or has the wrong shape.
    #[error("failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    /// A form field is missing or not a finite number.
    #[error("invalid field {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The scaler rejected the feature vector.
    #[error("scaler transform failed: {0}")]
    Transform(String),

    /// The model failed internally or produced no output.
    #[error("model prediction failed: {0}")]
    Prediction(String),
}

impl AqiError {
    pub fn artifact(path: impl Into<String>, reason: impl ToString) -> Self {
        AqiError::ArtifactLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the submitted form rather than the pipeline.
    pub fn is_validation(&self) -> bool {
        matches!(self, AqiError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, AqiError>;
