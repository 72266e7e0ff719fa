//! Inference engine: scaler transform followed by model prediction

use crate::config::AppConfig;
use crate::error::{AqiError, Result};
use crate::feature_extractor::FeatureExtractor;
use crate::models::loader::ModelLoader;
use crate::models::regressor::Regressor;
use crate::models::scaler::Scaler;
use crate::types::{AirQualityCategory, WeatherReading};
use tracing::{debug, info};

/// Result of model inference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Predicted air quality index
    pub index: f64,
    /// Category band the index falls into
    pub category: AirQualityCategory,
}

impl PredictionResult {
    pub fn from_index(index: f64) -> Self {
        Self {
            index,
            category: AirQualityCategory::classify(index),
        }
    }

    pub fn description(&self) -> &'static str {
        self.category.description()
    }

    pub fn advisory(&self) -> &'static str {
        self.category.advisory()
    }
}

/// Holds the loaded artifacts for the lifetime of the process
pub struct InferenceEngine {
    extractor: FeatureExtractor,
    scaler: Box<dyn Scaler>,
    model: Box<dyn Regressor>,
}

impl InferenceEngine {
    /// Load artifacts named in the configuration. Fails if either is missing or corrupt.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let extractor = FeatureExtractor::new();
        let loader = ModelLoader::with_threads(config.models.onnx_threads);
        let artifacts = loader.load_artifacts(
            &config.models.models_dir,
            &config.models.model_file,
            &config.models.scaler_file,
            extractor.feature_count(),
        )?;

        info!(
            model = %artifacts.model.name(),
            features = ?extractor.feature_names(),
            models_dir = %config.models.models_dir,
            "Inference engine initialized"
        );

        Ok(Self {
            extractor,
            scaler: artifacts.scaler,
            model: artifacts.model,
        })
    }

    /// Build an engine from already constructed artifacts.
    pub fn from_parts(scaler: Box<dyn Scaler>, model: Box<dyn Regressor>) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            scaler,
            model,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the scaler and model on a reading and classify the output.
    pub fn predict(&self, reading: &WeatherReading) -> Result<PredictionResult> {
        let features = self.extractor.extract(reading);
        let scaled = self.scaler.transform(&features)?;

        let output = self.model.predict(&scaled)?;
        let index = output
            .first()
            .copied()
            .ok_or_else(|| AqiError::Prediction("model returned no values".to_string()))?;

        let result = PredictionResult::from_index(index);

        debug!(
            model = %self.model.name(),
            index = index,
            category = %result.category,
            "Inference complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::regressor::LinearRegressor;
    use crate::models::scaler::StandardScaler;

    struct EmptyModel;

    impl Regressor for EmptyModel {
        fn name(&self) -> &str {
            "empty"
        }

        fn n_features(&self) -> Option<usize> {
            None
        }

        fn predict(&self, _features: &[f64]) -> Result<Vec<f64>> {
            Ok(Vec::new())
        }
    }

    fn reading() -> WeatherReading {
        WeatherReading::from_array([20.0, 25.0, 15.0, 1012.0, 60.0, 5.0, 3.0, 8.0])
    }

    #[test]
    fn test_predict_applies_scaler_then_model() {
        // Scaled humidity is (60 - 50) / 5 = 2, the model weights it by 40 and adds 10.
        let mut mean = vec![0.0; 8];
        let mut scale = vec![1.0; 8];
        mean[4] = 50.0;
        scale[4] = 5.0;
        let mut coefficients = vec![0.0; 8];
        coefficients[4] = 40.0;

        let engine = InferenceEngine::from_parts(
            Box::new(StandardScaler::new(mean, scale).unwrap()),
            Box::new(LinearRegressor::new(coefficients, 10.0)),
        );

        let result = engine.predict(&reading()).unwrap();
        assert_eq!(result.index, 90.0);
        assert_eq!(result.category, AirQualityCategory::Moderate);
    }

    #[test]
    fn test_predict_fixed_output_is_good() {
        let engine = InferenceEngine::from_parts(
            Box::new(StandardScaler::identity(8)),
            Box::new(LinearRegressor::new(vec![0.0; 8], 42.0)),
        );

        let result = engine.predict(&reading()).unwrap();
        assert_eq!(result.index, 42.0);
        assert_eq!(result.description(), "Good");
        assert!(result.advisory().contains("satisfactory"));
    }

    #[test]
    fn test_scaler_shape_error_is_transform_error() {
        let engine = InferenceEngine::from_parts(
            Box::new(StandardScaler::identity(5)),
            Box::new(LinearRegressor::new(vec![0.0; 8], 42.0)),
        );

        let err = engine.predict(&reading()).unwrap_err();
        assert!(matches!(err, AqiError::Transform(_)));
    }

    #[test]
    fn test_empty_model_output_is_prediction_error() {
        let engine = InferenceEngine::from_parts(
            Box::new(StandardScaler::identity(8)),
            Box::new(EmptyModel),
        );

        let err = engine.predict(&reading()).unwrap_err();
        assert!(matches!(err, AqiError::Prediction(_)));
    }
}
