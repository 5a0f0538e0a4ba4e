//! Shared fixtures for authentication tests

use std::sync::Arc;

use crate::repositories::{MockAddressRepository, MockUserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, Authorizer};
use crate::services::token::{TokenService, TokenServiceConfig};

pub struct Fixture {
    pub users: Arc<MockUserRepository>,
    pub addresses: Arc<MockAddressRepository>,
    pub tokens: Arc<TokenService>,
    pub auth: AuthService,
    pub authorizer: Authorizer,
}

pub fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let addresses = Arc::new(MockAddressRepository::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "auth-test-secret".to_string(),
        token_ttl_seconds: 3600,
    }));
    let auth = AuthService::new(
        users.clone(),
        addresses.clone(),
        tokens.clone(),
        AuthServiceConfig::fast(),
    );
    let authorizer = Authorizer::new(tokens.clone(), users.clone());

    Fixture {
        users,
        addresses,
        tokens,
        auth,
        authorizer,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
