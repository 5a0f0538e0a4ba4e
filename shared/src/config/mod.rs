//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing and password hashing
//! - `cache` - in-process product cache
//! - `consultant` - chat-completion API used by the consultant and search
//! - `database` - database connection and pool configuration
//! - `environment` - environment detection
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod consultant;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use consultant::ConsultantConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};

/// Configuration problems detected at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set in production")]
    DefaultSecretInProduction,

    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    InvalidBcryptCost(u32),

    #[error("JWT_TOKEN_TTL_SECONDS must be positive, got {0}")]
    InvalidTokenTtl(i64),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub consultant: ConsultantConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            consultant: ConsultantConfig::from_env(),
            cors: CorsConfig::from_env(),
        }
    }

    /// Reject settings the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultSecretInProduction);
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(self.auth.bcrypt_cost));
        }
        if self.auth.jwt.token_ttl_seconds <= 0 {
            return Err(ConfigError::InvalidTokenTtl(self.auth.jwt.token_ttl_seconds));
        }
        Ok(())
    }
}

/// Read and parse an environment variable, falling back on absence or parse failure
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
