//! Shared configuration and common types for the storefront server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response bodies shared by every endpoint

pub mod config;
pub mod types;

pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, ConsultantConfig, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, ServerConfig,
};
pub use types::{ErrorResponse, HealthResponse, MessageResponse};
