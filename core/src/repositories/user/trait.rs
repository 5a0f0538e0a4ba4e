//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User, UserPatch};
use crate::errors::DomainError;

/// Repository trait for account persistence operations
///
/// Implementations must enforce login uniqueness at the store level and
/// report a duplicate insert as `AuthError::UserAlreadyExists`, so that two
/// concurrent registrations of the same login yield exactly one account.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its unique login
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;

    /// Find an account by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Insert a new account with the default role
    ///
    /// # Returns
    /// * `Ok(User)` - the stored account with its assigned id
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - login taken
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Apply a partial update
    ///
    /// Returns `DomainError::NotFound` when no account has this id.
    async fn update_fields(&self, id: i64, patch: &UserPatch) -> Result<(), DomainError>;

    /// All accounts ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
