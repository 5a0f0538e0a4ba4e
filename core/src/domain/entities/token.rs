//! Session token payload.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Claims structure for JWT payload
///
/// Carries no confidential data; validity is decided by signature and `exp` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub id: i64,

    pub login: String,

    pub role: Role,

    /// Issued at (unix seconds)
    pub iat: i64,

    /// Expiration (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Claims issued now and expiring after `ttl`
    pub fn new(id: i64, login: impl Into<String>, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            login: login.into(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// A token is expired from the second its `exp` is reached
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
