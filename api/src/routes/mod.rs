//! Route handlers grouped by resource

pub mod addresses;
pub mod consultant;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod search;
pub mod users;
