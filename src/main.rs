mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::ScoreWeights;
use routes::matches::AppState;
use services::{GeocodeService, HttpEphemeris, MatchingEngine, ProfileStore, ScoreCache, SignDeriver};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Astro Match service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Geocode resolver with its TTL cache
    let geocoder = Arc::new(GeocodeService::new(
        settings.geocode.endpoint.clone(),
        Duration::from_secs(settings.cache.geocode_ttl_secs),
        settings.cache.geocode_capacity,
        Duration::from_secs(settings.geocode.timeout_secs),
    ));

    info!(
        "Geocode service initialized (TTL: {}s, capacity: {})",
        settings.cache.geocode_ttl_secs, settings.cache.geocode_capacity
    );

    // Ephemeris provider
    let ephemeris = Arc::new(HttpEphemeris::new(
        settings.ephemeris.endpoint.clone(),
        Duration::from_secs(settings.ephemeris.timeout_secs),
    ));

    info!("Ephemeris client initialized ({})", settings.ephemeris.endpoint);

    let deriver = Arc::new(SignDeriver::new(ephemeris, geocoder));

    // Explicitly-owned stores: fresh instances, no process-wide singletons
    let profiles = Arc::new(ProfileStore::new());
    let score_cache = Arc::new(ScoreCache::new(Duration::from_secs(
        settings.cache.score_ttl_secs,
    )));

    info!("Score cache initialized (TTL: {}s)", settings.cache.score_ttl_secs);

    let weights = ScoreWeights {
        sun: settings.scoring.weights.sun,
        moon: settings.scoring.weights.moon,
        rising: settings.scoring.weights.rising,
    };

    let engine = Arc::new(MatchingEngine::new(
        profiles,
        deriver,
        score_cache,
        weights,
        settings.matching.concurrency,
    ));

    info!("Matching engine initialized with weights: {:?}", weights);

    let app_state = AppState {
        engine,
        default_k: settings.matching.default_k,
        max_k: settings.matching.max_k,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
