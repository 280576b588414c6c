use serde::{Deserialize, Serialize};

use crate::core::AppKind;

/// Response for the predict endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub app: AppKind,
    pub features: Vec<f64>,
    /// Raw model output
    pub prediction: f64,
    /// Prediction after the app's display multiplier
    pub value: f64,
    pub display: String,
    pub message: String,
}

/// Loaded model summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub app: AppKind,
    pub kind: String,
    pub source: String,
    #[serde(rename = "featureCount")]
    pub feature_count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub models: Vec<ModelStatus>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
