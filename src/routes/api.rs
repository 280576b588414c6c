use actix_web::{web, HttpResponse, Responder};

use crate::core::AppKind;
use crate::models::{AppSchema, ErrorResponse, HealthResponse, ModelStatus, PredictRequest, PredictResponse};
use crate::routes::AppState;
use crate::services::PredictionError;

/// Configure all JSON API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/apps", web::get().to(list_apps))
        .route("/apps/{app}", web::get().to(get_app))
        .route("/apps/{app}/predict", web::post().to(predict));
}

fn unknown_app(name: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "unknown_app".to_string(),
        message: format!("No app named {:?}; expected one of: house, car", name),
        status_code: 404,
        details: None,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let models = AppKind::ALL
        .iter()
        .map(|&app| {
            let predictor = state.predictors.get(app);
            ModelStatus {
                app,
                kind: predictor.model_kind().to_string(),
                source: predictor.source().to_string(),
                feature_count: app.spec().feature_count,
            }
        })
        .collect();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        models,
    })
}

/// List the form schema of every app
///
/// GET /api/v1/apps
async fn list_apps() -> impl Responder {
    let apps: Vec<AppSchema> = AppKind::ALL.iter().map(|app| AppSchema::from(app.spec())).collect();
    HttpResponse::Ok().json(apps)
}

/// GET /api/v1/apps/{app}
async fn get_app(path: web::Path<String>) -> impl Responder {
    match path.parse::<AppKind>() {
        Ok(app) => HttpResponse::Ok().json(AppSchema::from(app.spec())),
        Err(_) => unknown_app(&path),
    }
}

/// Predict a price from a JSON object of field values
///
/// POST /api/v1/apps/{app}/predict
///
/// Request body:
/// ```json
/// {
///   "present_price": 5.0,
///   "kms_driven": 20000,
///   "owner": "0",
///   "car_age": 5,
///   "fuel_type": "Diesel",
///   "seller_type": "Individual",
///   "transmission": "Manual"
/// }
/// ```
async fn predict(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<PredictRequest>,
) -> impl Responder {
    let app = match path.parse::<AppKind>() {
        Ok(app) => app,
        Err(_) => return unknown_app(&path),
    };

    let request_id = uuid::Uuid::new_v4().to_string();
    let raw = req.into_inner().into_raw();

    match state.predictors.get(app).run(&raw) {
        Ok(prediction) => {
            tracing::info!(
                "Predicted {} price {} (request {})",
                app,
                prediction.price.display,
                request_id
            );
            HttpResponse::Ok().json(PredictResponse {
                request_id,
                app,
                features: prediction.features,
                prediction: prediction.price.raw,
                value: prediction.price.value,
                display: prediction.price.display,
                message: prediction.price.message,
            })
        }
        Err(err @ PredictionError::InvalidInput(_)) => {
            tracing::info!("Rejected {} input (request {}): {}", app, request_id, err);
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "invalid_input".to_string(),
                message: err.user_message(app).to_string(),
                status_code: 422,
                details: Some(err.to_string()),
            })
        }
        Err(err @ PredictionError::ModelInvocation(_)) => {
            tracing::error!("Model invocation failed for {} (request {}): {}", app, request_id, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "model_invocation".to_string(),
                message: err.user_message(app).to_string(),
                status_code: 500,
                details: Some(err.to_string()),
            })
        }
    }
}
