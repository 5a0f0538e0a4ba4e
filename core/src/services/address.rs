//! Address book of an account

use std::sync::Arc;

use crate::domain::entities::address::{Address, NewAddress};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::AddressRepository;
use crate::services::auth::{ensure_owner, Identity};

pub struct AddressService {
    addresses: Arc<dyn AddressRepository>,
}

impl AddressService {
    pub fn new(addresses: Arc<dyn AddressRepository>) -> Self {
        Self { addresses }
    }

    /// Create an address owned by the caller
    pub async fn create(&self, owner: &Identity, name: String, lat: f64, lng: f64) -> DomainResult<i64> {
        let id = self
            .addresses
            .create(NewAddress {
                user_id: owner.id,
                name,
                lat,
                lng,
            })
            .await?;
        tracing::debug!(address_id = id, user_id = owner.id, "Address created");
        Ok(id)
    }

    pub async fn list_for(&self, user_id: i64) -> DomainResult<Vec<Address>> {
        self.addresses.find_by_user(user_id).await
    }

    /// Delete an address; ownership is decided on the stored owner
    pub async fn delete(&self, caller: &Identity, address_id: i64) -> DomainResult<()> {
        let address = self
            .addresses
            .find_by_id(address_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Address"))?;

        ensure_owner(caller, address.user_id).map_err(|_| AuthError::InsufficientPermissions)?;

        if !self.addresses.delete(address_id).await? {
            return Err(DomainError::not_found("Address"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::Role;
    use crate::repositories::MockAddressRepository;

    fn caller(id: i64, role: Role) -> Identity {
        Identity {
            id,
            login: format!("user{}", id),
            role,
        }
    }

    #[tokio::test]
    async fn only_owner_or_admin_may_delete() {
        let service = AddressService::new(Arc::new(MockAddressRepository::new()));
        let alice = caller(1, Role::Customer);
        let bob = caller(2, Role::Customer);
        let admin = caller(3, Role::Admin);

        let first = service.create(&alice, "Home".into(), 1.0, 2.0).await.unwrap();
        let second = service.create(&alice, "Work".into(), 3.0, 4.0).await.unwrap();

        assert_eq!(
            service.delete(&bob, first).await.unwrap_err(),
            DomainError::Auth(AuthError::InsufficientPermissions)
        );
        service.delete(&alice, first).await.unwrap();
        service.delete(&admin, second).await.unwrap();
        assert!(service.list_for(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_address_is_not_found() {
        let service = AddressService::new(Arc::new(MockAddressRepository::new()));
        let result = service.delete(&caller(1, Role::Admin), 5).await;
        assert_eq!(result.unwrap_err(), DomainError::not_found("Address"));
    }
}
