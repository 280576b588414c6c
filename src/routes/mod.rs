// Route exports
pub mod api;
pub mod forms;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;

use crate::models::ErrorResponse;
use crate::services::Predictors;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictors: Arc<Predictors>,
}

impl AppState {
    pub fn new(predictors: Predictors) -> Self {
        Self {
            predictors: Arc::new(predictors),
        }
    }
}

/// JSON error response for payload errors
#[derive(Debug)]
pub struct JsonError(pub ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
        details: None,
    })
    .into()
}

/// Handle urlencoded form payload errors; the form routes serve HTML
pub fn handle_form_payload_error(err: error::UrlencodedError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    forms::FormPayloadError(err.to_string()).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::FormConfig::default().error_handler(handle_form_payload_error))
        .service(web::scope("/api/v1").configure(api::configure))
        .configure(forms::configure);
}
