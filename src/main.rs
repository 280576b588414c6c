use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use price_predictor::config::{LoggingSettings, Settings};
use price_predictor::core::AppKind;
use price_predictor::routes::{self, AppState};
use price_predictor::services::{Predictor, Predictors};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn load_predictor(app: AppKind, settings: &Settings) -> std::io::Result<Predictor> {
    let path = settings.models.path_for(app);
    Predictor::load(app, path).map_err(|e| {
        error!("Failed to load {} model from {}: {}", app, path, e);
        std::io::Error::other(format!("{} model unavailable: {}", app, e))
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // Logging comes up before reporting configuration errors
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    info!("Starting price predictor service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let predictors = Predictors {
        house: load_predictor(AppKind::House, &settings)?,
        car: load_predictor(AppKind::Car, &settings)?,
    };

    for app in AppKind::ALL {
        let predictor = predictors.get(app);
        info!(
            "Loaded {} model ({}, {} features) from {}",
            app,
            predictor.model_kind(),
            app.spec().feature_count,
            predictor.source()
        );
    }

    let app_state = AppState::new(predictors);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
