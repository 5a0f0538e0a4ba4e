use serde::{Deserialize, Serialize};

use sf_core::domain::entities::address::Address;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddressRequest {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressListResponse {
    pub addresses: Vec<Address>,
}
