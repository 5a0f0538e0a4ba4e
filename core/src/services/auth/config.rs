//! Configuration for the authentication service

use sf_shared::config::AuthConfig;

use crate::services::password::MIN_COST;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor used for new and changed passwords
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

impl AuthServiceConfig {
    /// Cheapest settings, for tests
    pub fn fast() -> Self {
        Self {
            bcrypt_cost: MIN_COST,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
