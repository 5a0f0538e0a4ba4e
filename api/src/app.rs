//! Application factory
//!
//! The route table is declared once in [`configure`]; [`create_app`] adds
//! shared state, body limits and the app-wide middleware.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use sf_core::services::auth::Authorizer;
use sf_shared::config::AppConfig;
use sf_shared::types::ErrorResponse;

use crate::handlers::json_error_handler;
use crate::middleware::create_cors;
use crate::routes::{addresses, consultant, health, notifications, orders, products, search, users};
use crate::state::AppState;

/// Declarative route table
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(web::scope("/users").configure(users::configure))
        .service(web::scope("/addresses").configure(addresses::configure))
        .service(web::scope("/products").configure(products::configure))
        .service(web::scope("/orders").configure(orders::configure))
        .service(web::scope("/consultant").configure(consultant::configure))
        .service(web::scope("/search").configure(search::configure))
        .configure(notifications::configure);
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    authorizer: web::Data<Authorizer>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(authorizer)
        .app_data(json_config)
        .wrap(create_cors(&config.cors))
        .wrap(Logger::default())
        .configure(configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
}
