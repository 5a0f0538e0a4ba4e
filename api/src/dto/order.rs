use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_core::domain::entities::order::{CustomerOrder, NewOrderItem};
use sf_core::services::order::PlaceOrder;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemRequest {
    /// Product id
    pub id: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// New order; any client-supplied `user_id` is ignored
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(range(min = 0.0))]
    pub total_price: f64,
    #[serde(default)]
    pub delivery_type: String,
    pub address_lat: f64,
    pub address_lng: f64,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<OrderItemRequest>,
}

impl From<CreateOrderRequest> for PlaceOrder {
    fn from(request: CreateOrderRequest) -> Self {
        Self {
            total_price: request.total_price,
            delivery_type: request.delivery_type,
            address_lat: request.address_lat,
            address_lng: request.address_lng,
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product_id: item.id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<CustomerOrder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}
