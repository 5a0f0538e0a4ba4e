//! In-memory implementation of AddressRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::address::{Address, NewAddress};
use crate::errors::DomainError;

use super::trait_::AddressRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    addresses: BTreeMap<i64, Address>,
}

/// Mock address repository for testing
#[derive(Default)]
pub struct MockAddressRepository {
    state: RwLock<State>,
}

impl MockAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressRepository for MockAddressRepository {
    async fn create(&self, address: NewAddress) -> Result<i64, DomainError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        state.addresses.insert(
            id,
            Address {
                id,
                user_id: address.user_id,
                name: address.name,
                lat: address.lat,
                lng: address.lng,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, DomainError> {
        Ok(self.state.read().await.addresses.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Address>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .addresses
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.write().await.addresses.remove(&id).is_some())
    }
}
