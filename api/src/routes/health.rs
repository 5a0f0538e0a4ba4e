use actix_web::HttpResponse;

use sf_shared::types::HealthResponse;

/// Handler for GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy("sf-api", env!("CARGO_PKG_VERSION")))
}
