//! Delivery address owned by an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    /// Owning account
    pub user_id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub user_id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}
