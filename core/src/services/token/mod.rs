//! Token service module for session JWT management

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
