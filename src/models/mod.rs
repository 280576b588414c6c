// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AppSchema, FieldSchema};
pub use requests::{FieldValue, PredictRequest};
pub use responses::{ErrorResponse, HealthResponse, ModelStatus, PredictResponse};
