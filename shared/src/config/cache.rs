//! In-process cache configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Configuration for the product list cache used by search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Product list time-to-live in seconds
    pub product_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            product_ttl_seconds: 900, // 15 minutes
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            product_ttl_seconds: env_or("PRODUCT_CACHE_TTL_SECONDS", 900),
        }
    }
}
