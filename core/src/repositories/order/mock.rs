//! In-memory implementation of OrderRepository
//!
//! Resolves product and customer columns through the sibling mock
//! repositories, the way the SQL implementation joins tables.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::order::{
    CustomerOrder, CustomerSummary, NewOrder, Order, OrderDetails, OrderItem, OrderStatus,
    OrderWithItems,
};
use crate::errors::DomainError;
use crate::repositories::product::{MockProductRepository, ProductRepository};
use crate::repositories::user::{MockUserRepository, UserRepository};

use super::trait_::OrderRepository;

#[derive(Default)]
struct State {
    next_order_id: i64,
    next_item_id: i64,
    orders: BTreeMap<i64, Order>,
    items: Vec<OrderItem>,
}

/// Mock order repository for testing
pub struct MockOrderRepository {
    state: RwLock<State>,
    users: Arc<MockUserRepository>,
    products: Arc<MockProductRepository>,
}

impl MockOrderRepository {
    pub fn new(users: Arc<MockUserRepository>, products: Arc<MockProductRepository>) -> Self {
        Self {
            state: RwLock::new(State::default()),
            users,
            products,
        }
    }

    async fn customer(&self, user_id: i64) -> Result<CustomerSummary, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        Ok(CustomerSummary {
            login: user.login,
            email: user.email,
            role: user.role,
            name: user.name,
            number: user.number,
        })
    }

    fn items_of(state: &State, order_id: i64) -> Vec<OrderItem> {
        state
            .items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<i64, DomainError> {
        // Resolve every item before touching state so a failure stores nothing
        let mut resolved = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let product = self.products.find_by_id(item.product_id).await?.ok_or_else(|| {
                DomainError::database(format!(
                    "Cannot add or update a child row: product {} does not exist",
                    item.product_id
                ))
            })?;
            resolved.push((item.clone(), product));
        }

        let mut state = self.state.write().await;
        state.next_order_id += 1;
        let order_id = state.next_order_id;
        state.orders.insert(
            order_id,
            Order {
                order_id,
                user_id: order.user_id,
                total_price: order.total_price,
                delivery_type: order.delivery_type,
                address_lat: order.address_lat,
                address_lng: order.address_lng,
                status: OrderStatus::default(),
                created_at: Utc::now(),
            },
        );
        for (item, product) in resolved {
            state.next_item_id += 1;
            let id = state.next_item_id;
            state.items.push(OrderItem {
                id,
                order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
                product_name: Some(product.name),
                product_description: Some(product.description),
            });
        }
        Ok(order_id)
    }

    async fn find_by_id(&self, order_id: i64) -> Result<Option<Order>, DomainError> {
        Ok(self.state.read().await.orders.get(&order_id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<OrderWithItems>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .map(|order| OrderWithItems {
                order: order.clone(),
                items: Self::items_of(&state, order.order_id),
            })
            .collect())
    }

    async fn list_with_customers(&self) -> Result<Vec<CustomerOrder>, DomainError> {
        let orders: Vec<Order> = self.state.read().await.orders.values().cloned().collect();
        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let customer = self.customer(order.user_id).await?;
            result.push(CustomerOrder { order, customer });
        }
        Ok(result)
    }

    async fn find_details(&self, order_id: i64) -> Result<Option<OrderDetails>, DomainError> {
        let (order, items) = {
            let state = self.state.read().await;
            match state.orders.get(&order_id) {
                Some(order) => (order.clone(), Self::items_of(&state, order_id)),
                None => return Ok(None),
            }
        };
        let customer = self.customer(order.user_id).await?;
        Ok(Some(OrderDetails {
            order,
            customer,
            items,
        }))
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.orders.get_mut(&order_id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
