//! Product search routes
//!
//! Failures other than a missing query are reported as a generic 500.

use actix_web::{web, HttpResponse};

use sf_core::errors::DomainError;

use crate::dto::search::{SearchRequest, SearchResponse};
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(ai_search).wrap(JwtAuth::new()))
        .route("/v2", web::post().to(fuzzy_search).wrap(JwtAuth::new()));
}

fn search_error(error: DomainError) -> ApiError {
    match error {
        DomainError::ValidationErr(_) => ApiError::Domain(error),
        other => {
            log::error!("Search failed: {}", other);
            ApiError::Internal
        }
    }
}

/// Handler for POST /search
pub async fn ai_search(
    state: web::Data<AppState>,
    caller: AuthContext,
    body: web::Json<SearchRequest>,
) -> ApiResult<HttpResponse> {
    let result = state
        .search
        .ai_search(caller.id, &body.query)
        .await
        .map_err(search_error)?;
    Ok(HttpResponse::Ok().json(SearchResponse { result }))
}

/// Handler for POST /search/v2
pub async fn fuzzy_search(
    state: web::Data<AppState>,
    body: web::Json<SearchRequest>,
) -> ApiResult<HttpResponse> {
    let result = state
        .search
        .fuzzy_search(&body.query)
        .await
        .map_err(search_error)?;
    Ok(HttpResponse::Ok().json(SearchResponse { result }))
}
