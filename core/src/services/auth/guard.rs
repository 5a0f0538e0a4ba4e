//! Request authorization: bearer token verification and the guards layered on it
//!
//! Every expected rejection is a [`Rejection`] value; the HTTP layer decides
//! how each one is rendered.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{Role, User};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

/// Why a request was not let through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No `Authorization: Bearer` header (401)
    MissingToken,
    /// Bad signature, malformed or expired token (403)
    InvalidToken,
    /// Authenticated but not allowed (403)
    InsufficientPermissions,
    /// Token was fine but the account could not be loaded (401)
    Unauthenticated,
}

impl Rejection {
    pub fn status_code(&self) -> u16 {
        match self {
            Rejection::MissingToken | Rejection::Unauthenticated => 401,
            Rejection::InvalidToken | Rejection::InsufficientPermissions => 403,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rejection::MissingToken => "Missing token",
            Rejection::InvalidToken => "Invalid token",
            Rejection::InsufficientPermissions => "Insufficient permissions",
            Rejection::Unauthenticated => "Unauthorized",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Identity carried by a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: i64,
    pub login: String,
    pub role: Role,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            login: claims.login,
            role: claims.role,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            role: user.role,
        }
    }
}

/// Extract the token from an `Authorization` header value
///
/// Only the `Bearer <token>` scheme is recognised; anything else counts as absent.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// In-token role must equal `required`
///
/// Trusts the role signed into the token, which may predate a role change.
/// Admin routes go through [`Authorizer::require_fresh_admin`] instead.
pub fn require_role(identity: &Identity, required: Role) -> Result<(), Rejection> {
    if identity.role == required {
        Ok(())
    } else {
        Err(Rejection::InsufficientPermissions)
    }
}

/// Passes for admins and for the owner; `owner_id` must come from the store
pub fn ensure_owner(identity: &Identity, owner_id: i64) -> Result<(), Rejection> {
    if identity.role.is_admin() || identity.id == owner_id {
        Ok(())
    } else {
        Err(Rejection::InsufficientPermissions)
    }
}

/// Token verifier plus the store lookup used for admin re-verification
pub struct Authorizer {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserRepository>,
}

impl Authorizer {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Verify the bearer token of a request
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity, Rejection> {
        let token = bearer_token(header).ok_or(Rejection::MissingToken)?;
        self.tokens
            .verify(token)
            .map(Identity::from)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                Rejection::InvalidToken
            })
    }

    /// Verify the token, then require the account's current role to be admin
    ///
    /// The in-token role is ignored; a demoted admin is rejected even while
    /// holding an unexpired admin token.
    pub async fn require_fresh_admin(&self, header: Option<&str>) -> Result<User, Rejection> {
        let identity = self.authenticate(header)?;

        let user = match self.users.find_by_id(identity.id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(user_id = identity.id, "Admin check for vanished account");
                return Err(Rejection::Unauthenticated);
            }
            Err(e) => {
                tracing::error!(user_id = identity.id, error = %e, "Admin check lookup failed");
                return Err(Rejection::Unauthenticated);
            }
        };

        if !user.role.is_admin() {
            tracing::warn!(user_id = user.id, "Admin route refused for non-admin account");
            return Err(Rejection::InsufficientPermissions);
        }
        Ok(user)
    }
}
