//! Feature scaling applied before inference

use crate::error::{AqiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Transform fitted at training time and replayed on every request.
pub trait Scaler: Send + Sync {
    /// Scale a feature vector. Fails if the vector has the wrong width.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Number of features the scaler was fitted on.
    fn n_features(&self) -> usize;
}

/// Standardization scaler: `(x - mean) / scale` per feature.
///
/// Serialized as `{"mean": [...], "scale": [...]}`, the fitted `mean_` and
/// `scale_` attributes of a standard scaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(AqiError::Transform(format!(
                "mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        Ok(Self { mean, scale })
    }

    /// Scaler that leaves features unchanged.
    pub fn identity(n_features: usize) -> Self {
        Self {
            mean: vec![0.0; n_features],
            scale: vec![1.0; n_features],
        }
    }

    /// Load a scaler from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|e| AqiError::artifact(&display, e))?;
        let parsed: StandardScaler =
            serde_json::from_str(&raw).map_err(|e| AqiError::artifact(&display, e))?;

        Self::new(parsed.mean, parsed.scale).map_err(|e| AqiError::artifact(display, e))
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.mean.len() {
            return Err(AqiError::Transform(format!(
                "expected {} features, got {}",
                self.mean.len(),
                features.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant features are fitted with a zero scale; leave them centred only.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }

    fn n_features(&self) -> usize {
        self.mean.len()
    }
}
