//! Artifact loader for the scaler and regression model

use crate::error::{AqiError, Result};
use crate::models::regressor::{LinearRegressor, OnnxRegressor, Regressor};
use crate::models::scaler::{Scaler, StandardScaler};
use std::path::Path;
use tracing::info;

/// Scaler and model loaded from disk, ready to be shared across requests
pub struct Artifacts {
    pub scaler: Box<dyn Scaler>,
    pub model: Box<dyn Regressor>,
}

/// Loader for training artifacts
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load the scaler from a JSON file
    pub fn load_scaler<P: AsRef<Path>>(&self, path: P) -> Result<StandardScaler> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading scaler");
        StandardScaler::from_file(path)
    }

    /// Load a regression model. `.onnx` files run through ONNX Runtime,
    /// `.json` files hold linear regression coefficients.
    pub fn load_model<P: AsRef<Path>>(&self, path: P) -> Result<Box<dyn Regressor>> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AqiError::artifact(path.display().to_string(), "file not found"));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model")
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        info!(model = %name, path = %path.display(), threads = self.onnx_threads, "Loading model");

        match extension.as_deref() {
            Some("onnx") => Ok(Box::new(OnnxRegressor::from_file(
                path,
                &name,
                self.onnx_threads,
            )?)),
            Some("json") => Ok(Box::new(LinearRegressor::from_file(path)?)),
            other => Err(AqiError::artifact(
                path.display().to_string(),
                format!("unsupported model format {:?}", other.unwrap_or("")),
            )),
        }
    }

    /// Load both artifacts from a directory and check that each was fitted on
    /// `expected_features` columns. Models that do not declare a width are not checked.
    pub fn load_artifacts<P: AsRef<Path>>(
        &self,
        models_dir: P,
        model_file: &str,
        scaler_file: &str,
        expected_features: usize,
    ) -> Result<Artifacts> {
        let models_dir = models_dir.as_ref();
        let scaler_path = models_dir.join(scaler_file);

        let scaler = self.load_scaler(&scaler_path)?;
        if scaler.n_features() != expected_features {
            return Err(AqiError::artifact(
                scaler_path.display().to_string(),
                format!(
                    "scaler was fitted on {} features, expected {}",
                    scaler.n_features(),
                    expected_features
                ),
            ));
        }

        let model_path = models_dir.join(model_file);
        let model = self.load_model(&model_path)?;
        if let Some(width) = model.n_features() {
            if width != expected_features {
                return Err(AqiError::artifact(
                    model_path.display().to_string(),
                    format!(
                        "model was fitted on {} features, expected {}",
                        width, expected_features
                    ),
                ));
            }
        }

        info!(
            model = %model.name(),
            features = expected_features,
            "Loaded artifacts from {}",
            models_dir.display()
        );

        Ok(Artifacts {
            scaler: Box::new(scaler),
            model,
        })
    }
}
