//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, Role, User, UserPatch};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

/// Mock user repository for testing
#[derive(Default)]
pub struct MockUserRepository {
    state: Arc<RwLock<State>>,
    unavailable: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Change a role directly in the store, as an operator would
    pub async fn set_role(&self, id: i64, role: Role) -> bool {
        let mut state = self.state.write().await;
        match state.users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                true
            }
            None => false,
        }
    }

    /// Remove an account directly from the store
    pub async fn remove(&self, id: i64) -> bool {
        self.state.write().await.users.remove(&id).is_some()
    }

    /// Make every call fail with a database error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.users.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("user store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.login == login).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.check_available()?;
        let mut state = self.state.write().await;

        // Uniqueness is checked under the write lock, like a UNIQUE index
        if state.users.values().any(|u| u.login == user.login) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        state.next_id += 1;
        let now = Utc::now();
        let stored = User {
            id: state.next_id,
            login: user.login,
            password_hash: user.password_hash,
            email: user.email,
            number: user.number,
            name: user.name,
            role: Role::default(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_fields(&self, id: i64, patch: &UserPatch) -> Result<(), DomainError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User"))?;
        patch.apply_to(user);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }
}
