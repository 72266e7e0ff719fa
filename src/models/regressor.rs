//! Regression models producing an air quality index

use crate::error::{AqiError, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Tensor, ValueType};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// A fitted regression estimator.
pub trait Regressor: Send + Sync {
    /// Model name for logging
    fn name(&self) -> &str;

    /// Input width the model was fitted on, `None` when the model does not declare it.
    fn n_features(&self) -> Option<usize>;

    /// Predict from one scaled feature vector. Returns the model's full output;
    /// callers take the first element.
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>>;
}

/// Linear regression serialized as `{"coefficients": [...], "intercept": x}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Load coefficients from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AqiError::artifact(path.display().to_string(), e))?;
        serde_json::from_str(&raw).map_err(|e| AqiError::artifact(path.display().to_string(), e))
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        "linear"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.coefficients.len() {
            return Err(AqiError::Prediction(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let value = features
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;

        Ok(vec![value])
    }
}

/// ONNX regression graph run through ONNX Runtime.
pub struct OnnxRegressor {
    /// Model name
    name: String,
    /// `run` needs exclusive access to the session
    session: Mutex<Session>,
    /// Input name for the model
    input_name: String,
    /// Output name for the predicted value
    output_name: String,
    /// Fixed width of the input's last dimension
    input_width: Option<usize>,
}

impl OnnxRegressor {
    /// Load an ONNX model from file
    pub fn from_file<P: AsRef<Path>>(path: P, name: &str, threads: usize) -> Result<Self> {
        let path = path.as_ref();
        let session = build_session(path, threads)
            .map_err(|e| AqiError::artifact(path.display().to_string(), e))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        // Symbolic dimensions come back negative
        let input_width = session
            .inputs
            .first()
            .and_then(|i| match &i.input_type {
                ValueType::Tensor { shape, .. } => shape.iter().last().copied(),
                _ => None,
            })
            .and_then(|dim| usize::try_from(dim).ok());

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "variable".to_string());

        debug!(
            model = %name,
            input = %input_name,
            output = %output_name,
            input_width = ?input_width,
            "ONNX session ready"
        );

        Ok(Self {
            name: name.to_string(),
            session: Mutex::new(session),
            input_name,
            output_name,
            input_width,
        })
    }
}

fn build_session(path: &Path, threads: usize) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(threads)?
        .commit_from_file(path)
}

impl Regressor for OnnxRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> Option<usize> {
        self.input_width
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>> {
        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let data: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let input_tensor = Tensor::from_array((shape, data))
            .map_err(|e| AqiError::Prediction(format!("failed to create input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| AqiError::Prediction(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_tensor])
            .map_err(|e| AqiError::Prediction(e.to_string()))?;

        let output = outputs.get(&self.output_name).ok_or_else(|| {
            AqiError::Prediction(format!("model has no output named {}", self.output_name))
        })?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| AqiError::Prediction(format!("unexpected output type: {e}")))?;

        Ok(data.iter().map(|&v| v as f64).collect())
    }
}
