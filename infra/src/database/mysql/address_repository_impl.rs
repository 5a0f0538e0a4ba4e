//! MySQL implementation of the AddressRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use sf_core::domain::entities::address::{Address, NewAddress};
use sf_core::errors::DomainError;
use sf_core::repositories::AddressRepository;

use super::{column, query_error};

pub struct MySqlAddressRepository {
    pool: MySqlPool,
}

impl MySqlAddressRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_address(row: &MySqlRow) -> Result<Address, DomainError> {
        Ok(Address {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            name: column(row, "name")?,
            lat: column(row, "lat")?,
            lng: column(row, "lng")?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl AddressRepository for MySqlAddressRepository {
    async fn create(&self, address: NewAddress) -> Result<i64, DomainError> {
        let result = sqlx::query("INSERT INTO addresses (user_id, name, lat, lng) VALUES (?, ?, ?, ?)")
            .bind(address.user_id)
            .bind(&address.name)
            .bind(address.lat)
            .bind(address.lng)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.last_insert_id() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Address>, DomainError> {
        let row = sqlx::query("SELECT id, user_id, name, lat, lng, created_at FROM addresses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_address).transpose()
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Address>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, lat, lng, created_at FROM addresses WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter().map(Self::row_to_address).collect()
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
