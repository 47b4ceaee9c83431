use crate::models::{
    DeriveSignsRequest, DeriveSignsResponse, ErrorResponse, HealthResponse, SaveChartRequest,
    ScoreResponse, TopMatchesQuery, TopMatchesResponse,
};
use crate::core::compat::tier_label;
use crate::services::{DeriveError, EngineError, MatchingEngine};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchingEngine>,
    pub default_k: usize,
    pub max_k: usize,
}

/// Configure all chart and match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/charts", web::post().to(save_chart))
        .route("/charts/{email}", web::get().to(get_chart))
        .route("/signs/derive", web::post().to(derive_signs))
        .route("/compatibility/{a}/{b}", web::get().to(score_pair))
        .route("/matches/top", web::get().to(top_matches));
}

fn error_response(err: &EngineError) -> HttpResponse {
    let (status_code, error) = match err {
        EngineError::Validation(_) => (400, "validation_failed"),
        EngineError::NotFound(_) => (404, "not_found"),
        EngineError::EmptyPopulation => (409, "empty_population"),
        EngineError::Derive(DeriveError::Geocode(_)) => (502, "geocode_failed"),
        EngineError::Derive(DeriveError::Ephemeris(_)) => (502, "ephemeris_failed"),
    };

    let body = ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
    };

    match status_code {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        409 => HttpResponse::Conflict().json(body),
        502 => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Save a birth chart
///
/// POST /api/v1/charts
///
/// Request body:
/// ```json
/// {
///   "email": "ada@example.com",
///   "birthDate": "1990-04-01",
///   "birthTime": "08:30:00",
///   "birthLocation": "San Francisco, CA"
/// }
/// ```
async fn save_chart(
    state: web::Data<AppState>,
    req: web::Json<SaveChartRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for save_chart request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .engine
        .save_chart(&req.email, req.birth_date, req.birth_time, &req.birth_location)
        .await
    {
        Ok(chart) => HttpResponse::Ok().json(chart),
        Err(e) => {
            tracing::error!("Failed to save chart for {}: {}", req.email, e);
            error_response(&e)
        }
    }
}

/// Fetch a saved birth chart
///
/// GET /api/v1/charts/{email}
async fn get_chart(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.engine.chart(&path.into_inner()) {
        Ok(chart) => HttpResponse::Ok().json(chart),
        Err(e) => error_response(&e),
    }
}

/// Derive signs without saving
///
/// POST /api/v1/signs/derive
async fn derive_signs(
    state: web::Data<AppState>,
    req: web::Json<DeriveSignsRequest>,
) -> impl Responder {
    let derived = state
        .engine
        .derive_signs(req.birth_date, req.birth_time, req.birth_location.as_deref())
        .await;

    match derived {
        Ok(signs) => HttpResponse::Ok().json(DeriveSignsResponse {
            sun: signs.sun,
            moon: signs.moon,
            rising: signs.rising,
        }),
        Err(e) => {
            tracing::error!("Sign derivation failed: {}", e);
            error_response(&e)
        }
    }
}

/// Pairwise compatibility score
///
/// GET /api/v1/compatibility/{a}/{b}
async fn score_pair(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (a, b) = path.into_inner();
    match state.engine.score_pair(&a, &b) {
        Ok(score) => HttpResponse::Ok().json(ScoreResponse {
            user_a: a,
            user_b: b,
            score,
            tier: tier_label(score).to_string(),
        }),
        Err(e) => error_response(&e),
    }
}

/// Top-K compatible users
///
/// GET /api/v1/matches/top?email={email}&k={k}
async fn top_matches(
    state: web::Data<AppState>,
    query: web::Query<TopMatchesQuery>,
) -> impl Responder {
    // Cap k to keep a single call from ranking the whole population out
    let k = query.k.unwrap_or(state.default_k).min(state.max_k);

    tracing::info!("Finding top {} matches for {}", k, query.email);

    match state.engine.top_matches(&query.email, k).await {
        Ok(result) => HttpResponse::Ok().json(TopMatchesResponse {
            matches: result.matches,
            total_candidates: result.total_candidates,
        }),
        Err(e) => {
            tracing::info!("Top matches failed for {}: {}", query.email, e);
            error_response(&e)
        }
    }
}
