//! Address repository trait.

use async_trait::async_trait;

use crate::domain::entities::address::{Address, NewAddress};
use crate::errors::DomainError;

#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert an address and return its id
    async fn create(&self, address: NewAddress) -> Result<i64, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, DomainError>;

    /// Addresses owned by `user_id`, oldest first
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Address>, DomainError>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
