//! Common types used across the application

pub mod response;

pub use response::{ErrorResponse, HealthResponse, MessageResponse};
