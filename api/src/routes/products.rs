//! Catalog routes; reads are public, writes need a fresh admin

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::errors::{DomainError, ValidationError};
use sf_shared::types::MessageResponse;

use crate::dto::product::{
    CreateProductRequest, CreateProductWithUrlsRequest, ProductSavedResponse, UpdateProductRequest,
};
use crate::handlers::ApiResult;
use crate::middleware::AdminOnly;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_products))
        .route("", web::post().to(create_product).wrap(AdminOnly::new()))
        .route(
            "/image_urls",
            web::post().to(create_product_with_urls).wrap(AdminOnly::new()),
        )
        .route("/{id}", web::get().to(get_product))
        .route("/{id}", web::put().to(update_product).wrap(AdminOnly::new()))
        .route("/{id}", web::delete().to(delete_product).wrap(AdminOnly::new()));
}

pub async fn list_products(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let products = state.catalog.list().await?;
    Ok(HttpResponse::Ok().json(products))
}

pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let product = state.catalog.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

async fn create(state: &AppState, request: CreateProductRequest) -> ApiResult<HttpResponse> {
    request.validate()?;
    let product = request
        .into_new_product()
        .map_err(|field| DomainError::from(ValidationError::required(field)))?;

    let id = state.catalog.create(product).await?;
    Ok(HttpResponse::Created().json(ProductSavedResponse {
        message: "Product created".to_string(),
        id,
    }))
}

pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    create(&state, body.into_inner()).await
}

/// Handler for POST /products/image_urls; `imageUrl` is comma-separated
pub async fn create_product_with_urls(
    state: web::Data<AppState>,
    body: web::Json<CreateProductWithUrlsRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;
    create(&state, request.into()).await
}

/// Handler for PUT /products/{id}; `image_urls`, when present, replaces all images
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateProductRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let id = path.into_inner();
    state.catalog.update(id, request.into()).await?;
    Ok(HttpResponse::Ok().json(ProductSavedResponse {
        message: "Product updated".to_string(),
        id,
    }))
}

pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.catalog.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Product deleted successfully")))
}
