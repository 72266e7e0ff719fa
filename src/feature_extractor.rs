//! Feature extraction for air quality model inference.
//!
//! The scaler and model were fitted on the eight daily weather measurements in a
//! fixed column order. This module is the single place that order is encoded.

use crate::types::reading::{WeatherReading, FIELD_NAMES};

/// Feature extractor that turns a weather reading into model input features.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a reading.
    ///
    /// Returns the eight raw measurements in training column order
    /// (T, TM, Tm, SLP, H, VV, V, VM).
    pub fn extract(&self, reading: &WeatherReading) -> Vec<f64> {
        reading.to_array().to_vec()
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FIELD_NAMES.len()
    }

    /// Get feature names in training order.
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FIELD_NAMES
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
