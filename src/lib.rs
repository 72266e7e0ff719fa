//! Air Quality Predictor Library
//!
//! Scores daily weather readings with a pre-trained air quality model and
//! maps the predicted index to a category and health advisory.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod metrics;
pub mod models;
pub mod pages;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::AqiError;
pub use feature_extractor::FeatureExtractor;
pub use models::inference::{InferenceEngine, PredictionResult};
pub use server::{router, AppState};
pub use types::{AirQualityCategory, WeatherReading};
