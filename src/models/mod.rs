//! Model artifacts and inference

pub mod inference;
pub mod loader;
pub mod regressor;
pub mod scaler;

pub use inference::{InferenceEngine, PredictionResult};
pub use loader::{Artifacts, ModelLoader};
pub use regressor::{LinearRegressor, OnnxRegressor, Regressor};
pub use scaler::{Scaler, StandardScaler};
