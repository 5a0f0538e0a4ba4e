//! Order routes
//!
//! Customers place and list their own orders; listing all orders, reading
//! one by id and changing status need a fresh admin.

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_shared::types::MessageResponse;

use crate::dto::order::{
    CreateOrderRequest, OrderCreatedResponse, OrderListResponse, UpdateOrderStatusRequest,
};
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::{AdminOnly, AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_order).wrap(JwtAuth::new()))
        .route("", web::get().to(list_orders).wrap(AdminOnly::new()))
        .route("/user", web::get().to(user_orders).wrap(JwtAuth::new()))
        .route("/{order_id}", web::get().to(order_details).wrap(AdminOnly::new()))
        .route("/{order_id}", web::put().to(update_status).wrap(AdminOnly::new()));
}

/// Handler for POST /orders
///
/// The order belongs to the caller whatever `user_id` the body carries.
/// Order and items are stored atomically.
pub async fn create_order(
    state: web::Data<AppState>,
    caller: AuthContext,
    body: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let order_id = state.orders.place(caller.id, request.into()).await?;
    Ok(HttpResponse::Created().json(OrderCreatedResponse {
        message: "Order created".to_string(),
        order_id,
    }))
}

pub async fn user_orders(
    state: web::Data<AppState>,
    caller: AuthContext,
) -> ApiResult<HttpResponse> {
    let orders = state.orders.orders_of(caller.id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

pub async fn list_orders(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let orders = state.orders.all_orders().await?;
    if orders.is_empty() {
        return Err(ApiError::not_found("No orders found"));
    }
    Ok(HttpResponse::Ok().json(OrderListResponse { orders }))
}

pub async fn order_details(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let details = state.orders.details(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(details))
}

/// Handler for PUT /orders/{order_id}
///
/// ## Errors
/// - 400 `Missing status` or `Invalid status. Allowed values are: ...`
/// - 404 `Order not found`
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> ApiResult<HttpResponse> {
    state
        .orders
        .update_status(path.into_inner(), body.status.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Order updated")))
}
