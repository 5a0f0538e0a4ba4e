//! Delivery address routes; all require a token

use actix_web::{web, HttpResponse};

use sf_core::errors::{DomainError, ValidationError};
use sf_shared::types::MessageResponse;

use crate::dto::address::{AddressCreatedResponse, AddressListResponse, CreateAddressRequest};
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_address).wrap(JwtAuth::new()))
        .route("/user", web::get().to(list_addresses).wrap(JwtAuth::new()))
        .route("/{id}", web::delete().to(delete_address).wrap(JwtAuth::new()));
}

/// Handler for POST /addresses; the owner is always the caller
pub async fn create_address(
    state: web::Data<AppState>,
    caller: AuthContext,
    body: web::Json<CreateAddressRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let (Some(name), Some(lat), Some(lng)) = (request.name, request.lat, request.lng) else {
        return Err(DomainError::from(ValidationError::required("name, lat or lng")).into());
    };

    let id = state.addresses.create(&caller, name, lat, lng).await?;
    Ok(HttpResponse::Created().json(AddressCreatedResponse {
        message: "Address created".to_string(),
        id,
    }))
}

pub async fn list_addresses(
    state: web::Data<AppState>,
    caller: AuthContext,
) -> ApiResult<HttpResponse> {
    let addresses = state.addresses.list_for(caller.id).await?;
    if addresses.is_empty() {
        return Err(ApiError::not_found("No addresses found for the user"));
    }
    Ok(HttpResponse::Ok().json(AddressListResponse { addresses }))
}

/// Handler for DELETE /addresses/{id}
///
/// Ownership is checked against the stored owner of the address.
pub async fn delete_address(
    state: web::Data<AppState>,
    caller: AuthContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.addresses.delete(&caller, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Address deleted successfully")))
}
