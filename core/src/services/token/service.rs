//! Session token issuing and verification

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{Role, User};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies HS256 session tokens
///
/// Tokens are stateless: a token is valid iff its signature checks out
/// against the server secret and `exp` lies strictly in the future.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Configured session lifetime
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.config.token_ttl_seconds)
    }

    /// Sign a token for the given identity that expires after `ttl`
    pub fn issue(
        &self,
        account_id: i64,
        login: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(account_id, login, role, ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::TokenGenerationFailed(e.to_string()).into())
    }

    /// Sign a session token for an account with the configured lifetime
    pub fn issue_for(&self, user: &User) -> Result<String, DomainError> {
        self.issue(user.id, &user.login, user.role, self.ttl())
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            })?;

        // The library accepts `exp == now`; sessions end the second `exp` is reached
        if token_data.claims.is_expired() {
            return Err(TokenError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
