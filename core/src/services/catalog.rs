//! Product catalog reads and admin writes

use std::sync::Arc;

use crate::domain::entities::product::{NewProduct, Product, ProductPatch};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ProductRepository;
use crate::services::cache::TtlCache;

/// Catalog operations; every write drops the cached product list
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    cache: Arc<TtlCache<Vec<Product>>>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>, cache: Arc<TtlCache<Vec<Product>>>) -> Self {
        Self { products, cache }
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        self.products.list().await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product"))
    }

    pub async fn create(&self, product: NewProduct) -> DomainResult<i64> {
        let id = self.products.create(product).await?;
        self.cache.invalidate().await;
        tracing::info!(product_id = id, "Product created");
        Ok(id)
    }

    pub async fn update(&self, id: i64, patch: ProductPatch) -> DomainResult<()> {
        if !self.products.update(id, &patch).await? {
            return Err(DomainError::not_found("Product"));
        }
        self.cache.invalidate().await;
        tracing::info!(product_id = id, "Product updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.products.delete(id).await? {
            return Err(DomainError::not_found("Product"));
        }
        self.cache.invalidate().await;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
