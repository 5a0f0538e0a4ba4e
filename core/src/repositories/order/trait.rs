//! Order repository trait.

use async_trait::async_trait;

use crate::domain::entities::order::{
    CustomerOrder, NewOrder, Order, OrderDetails, OrderStatus, OrderWithItems,
};
use crate::errors::DomainError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and all of its items atomically
    ///
    /// If any item fails to insert nothing is stored and the error is returned.
    async fn create(&self, order: NewOrder) -> Result<i64, DomainError>;

    async fn find_by_id(&self, order_id: i64) -> Result<Option<Order>, DomainError>;

    /// Orders placed by `user_id`, each with its items
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<OrderWithItems>, DomainError>;

    /// Every order with the customer who placed it
    async fn list_with_customers(&self) -> Result<Vec<CustomerOrder>, DomainError>;

    /// Order, customer and items
    async fn find_details(&self, order_id: i64) -> Result<Option<OrderDetails>, DomainError>;

    /// Returns `false` when the order does not exist
    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<bool, DomainError>;
}
