//! Type definitions for the air quality predictor

pub mod category;
pub mod reading;

pub use category::AirQualityCategory;
pub use reading::{WeatherReading, FIELD_NAMES};
