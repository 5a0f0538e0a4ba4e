//! In-memory implementation of ProductRepository

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::product::{NewProduct, Product, ProductPatch};
use crate::errors::DomainError;

use super::trait_::ProductRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    products: BTreeMap<i64, Product>,
}

/// Mock product repository for testing
#[derive(Default)]
pub struct MockProductRepository {
    state: RwLock<State>,
    list_calls: AtomicUsize,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `list` calls served, used to observe caching
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().await.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<i64, DomainError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        state.products.insert(
            id,
            Product {
                id,
                name: product.name,
                description: product.description,
                price: product.price,
                quantity_in_stock: product.quantity_in_stock,
                key_words: product.key_words,
                images: product.image_urls,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, patch: &ProductPatch) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.products.get_mut(&id) {
            Some(product) => {
                patch.apply_to(product);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state.write().await.products.remove(&id).is_some())
    }
}
