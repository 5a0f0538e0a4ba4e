//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sf_shared::config::CorsConfig;

/// Creates the CORS middleware from configuration.
///
/// An empty list or `*` allows any origin; otherwise only the listed origins
/// are accepted.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
