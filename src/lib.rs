//! Price Predictor - form-driven house and car price prediction service
//!
//! Each app turns a form submission into a fixed-order feature vector, runs it
//! through a regression model loaded at startup, and formats the predicted
//! price for display.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{encode, format_prediction, AppKind, EncodeError, FeatureVector, FormattedPrice};
pub use crate::services::{load_model, ModelError, PredictionError, Predictor, Predictors, Regressor};
