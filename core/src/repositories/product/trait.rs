//! Product repository trait.

use async_trait::async_trait;

use crate::domain::entities::product::{NewProduct, Product, ProductPatch};
use crate::errors::DomainError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product with its images and keywords, ordered by id
    async fn list(&self) -> Result<Vec<Product>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError>;

    /// Insert a product and its images, returning the new id
    async fn create(&self, product: NewProduct) -> Result<i64, DomainError>;

    /// Returns `false` when the product does not exist
    async fn update(&self, id: i64, patch: &ProductPatch) -> Result<bool, DomainError>;

    /// Returns `false` when the product does not exist
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
