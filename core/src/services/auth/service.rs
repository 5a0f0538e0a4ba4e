//! Account registration, authentication and self-service profile management

use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::address::Address;
use crate::domain::entities::user::{NewUser, User, UserPatch};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{AddressRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub login: String,
    pub password: String,
    pub email: Option<String>,
    pub number: Option<String>,
    pub name: Option<String>,
}

/// Self-service profile change; the password is re-hashed when present
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub number: Option<String>,
}

/// Account with its addresses
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user: User,
    pub addresses: Vec<Address>,
}

/// Authentication service for the account lifecycle
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    addresses: Arc<dyn AddressRepository>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        addresses: Arc<dyn AddressRepository>,
        tokens: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            addresses,
            tokens,
            hasher: PasswordHasher::new(config.bcrypt_cost),
        }
    }

    /// Create an account with the default role
    ///
    /// The existence check gives the common case a clean 409; the store's
    /// unique constraint settles concurrent registrations of the same login.
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<User> {
        if command.login.is_empty() || command.password.is_empty() {
            return Err(ValidationError::required("login or password").into());
        }

        if self.users.find_by_login(&command.login).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hasher.hash(&command.password).await?;
        let user = self
            .users
            .create(NewUser {
                login: command.login,
                password_hash,
                email: command.email,
                number: command.number,
                name: command.name,
            })
            .await?;

        tracing::info!(user_id = user.id, login = %user.login, "Account registered");
        Ok(user)
    }

    /// Check credentials and issue a session token
    pub async fn authenticate(&self, login: &str, password: &str) -> DomainResult<String> {
        if login.is_empty() || password.is_empty() {
            return Err(ValidationError::required("login or password").into());
        }

        let user = self
            .users
            .find_by_login(login)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(password, &user.password_hash).await {
            tracing::warn!(login = %login, "Authentication failed: invalid password");
            return Err(AuthError::InvalidPassword.into());
        }

        let token = self.tokens.issue_for(&user)?;
        tracing::info!(user_id = user.id, "Session token issued");
        Ok(token)
    }

    pub async fn account(&self, id: i64) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    pub async fn profile(&self, id: i64) -> DomainResult<Profile> {
        let user = self.account(id).await?;
        let addresses = self.addresses.find_by_user(id).await?;
        Ok(Profile { user, addresses })
    }

    pub async fn list_accounts(&self) -> DomainResult<Vec<User>> {
        self.users.list().await
    }

    /// Apply a profile change; an update with no fields is a no-op
    pub async fn update_account(&self, id: i64, update: ProfileUpdate) -> DomainResult<()> {
        self.account(id).await?;

        let password_hash = match update.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.hasher.hash(password).await?),
            _ => None,
        };
        let patch = UserPatch {
            password_hash,
            name: update.name,
            email: update.email,
            number: update.number,
        };
        if patch.is_empty() {
            return Ok(());
        }

        self.users.update_fields(id, &patch).await?;
        tracing::info!(user_id = id, "Account updated");
        Ok(())
    }
}
