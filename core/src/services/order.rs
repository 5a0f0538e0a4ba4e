//! Order placement, listing and admin status changes

use std::sync::Arc;

use crate::domain::entities::order::{
    CustomerOrder, NewOrder, NewOrderItem, OrderDetails, OrderStatus, OrderWithItems,
};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::OrderRepository;
use crate::services::notification::{Notification, NotificationHub};

/// Order placement input; the owner always comes from the caller's token
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub total_price: f64,
    pub delivery_type: String,
    pub address_lat: f64,
    pub address_lng: f64,
    pub items: Vec<NewOrderItem>,
}

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    notifications: NotificationHub,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, notifications: NotificationHub) -> Self {
        Self {
            orders,
            notifications,
        }
    }

    /// Persist the order with its items as one unit and notify the owner
    pub async fn place(&self, user_id: i64, order: PlaceOrder) -> DomainResult<i64> {
        if order.items.is_empty() {
            return Err(ValidationError::required("items").into());
        }

        let order_id = self
            .orders
            .create(NewOrder {
                user_id,
                total_price: order.total_price,
                delivery_type: order.delivery_type,
                address_lat: order.address_lat,
                address_lng: order.address_lng,
                items: order.items,
            })
            .await?;

        tracing::info!(order_id, user_id, "Order created");
        self.notifications
            .publish(user_id, Notification::OrderCreated { order_id });
        Ok(order_id)
    }

    pub async fn orders_of(&self, user_id: i64) -> DomainResult<Vec<OrderWithItems>> {
        self.orders.find_by_user(user_id).await
    }

    pub async fn all_orders(&self) -> DomainResult<Vec<CustomerOrder>> {
        self.orders.list_with_customers().await
    }

    pub async fn details(&self, order_id: i64) -> DomainResult<OrderDetails> {
        self.orders
            .find_details(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))
    }

    /// Validate and apply a status change, then notify the order's owner
    pub async fn update_status(&self, order_id: i64, status: Option<&str>) -> DomainResult<()> {
        let status = parse_status(status)?;

        if !self.orders.update_status(order_id, status).await? {
            return Err(DomainError::not_found("Order"));
        }
        tracing::info!(order_id, status = %status, "Order status changed");

        if let Some(order) = self.orders.find_by_id(order_id).await? {
            self.notifications.publish(
                order.user_id,
                Notification::OrderStatusChanged { order_id, status },
            );
        }
        Ok(())
    }
}

fn parse_status(status: Option<&str>) -> Result<OrderStatus, ValidationError> {
    let raw = status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::required("status"))?;
    raw.parse().map_err(|_| {
        ValidationError::invalid(format!(
            "Invalid status. Allowed values are: {}",
            OrderStatus::allowed_values()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::product::NewProduct;
    use crate::domain::entities::user::NewUser;
    use crate::repositories::{
        MockOrderRepository, MockProductRepository, MockUserRepository, ProductRepository,
        UserRepository,
    };

    struct Setup {
        service: OrderService,
        hub: NotificationHub,
        user_id: i64,
        product_id: i64,
    }

    async fn setup() -> Setup {
        let users = Arc::new(MockUserRepository::new());
        let products = Arc::new(MockProductRepository::new());
        let user_id = users
            .create(NewUser {
                login: "alice".into(),
                password_hash: "x".into(),
                email: None,
                number: None,
                name: None,
            })
            .await
            .unwrap()
            .id;
        let product_id = products
            .create(NewProduct {
                name: "Laptop".into(),
                description: "14 inch".into(),
                price: 999.0,
                quantity_in_stock: 2,
                key_words: vec![],
                image_urls: vec![],
            })
            .await
            .unwrap();
        let hub = NotificationHub::new(16);
        let service = OrderService::new(
            Arc::new(MockOrderRepository::new(users, products)),
            hub.clone(),
        );
        Setup {
            service,
            hub,
            user_id,
            product_id,
        }
    }

    fn order_of(product_id: i64) -> PlaceOrder {
        PlaceOrder {
            total_price: 999.0,
            delivery_type: "courier".into(),
            address_lat: 53.9,
            address_lng: 27.5,
            items: vec![NewOrderItem {
                product_id,
                quantity: 1,
                price: 999.0,
            }],
        }
    }

    #[tokio::test]
    async fn placing_an_order_notifies_its_owner() {
        let s = setup().await;
        let mut subscription = s.hub.subscribe(s.user_id);

        let order_id = s.service.place(s.user_id, order_of(s.product_id)).await.unwrap();

        assert_eq!(subscription.next().await, Some(Notification::OrderCreated { order_id }));
        let orders = s.service.orders_of(s.user_id).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items[0].product_name.as_deref(), Some("Laptop"));
    }

    #[tokio::test]
    async fn failing_item_stores_nothing() {
        let s = setup().await;
        let mut order = order_of(s.product_id);
        order.items.push(NewOrderItem {
            product_id: 404,
            quantity: 1,
            price: 1.0,
        });

        let result = s.service.place(s.user_id, order).await;
        assert!(matches!(result, Err(DomainError::Database { .. })));
        assert!(s.service.orders_of(s.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_changes_are_validated_and_announced() {
        let s = setup().await;
        let order_id = s.service.place(s.user_id, order_of(s.product_id)).await.unwrap();
        let mut subscription = s.hub.subscribe(s.user_id);

        assert_eq!(
            s.service.update_status(order_id, None).await.unwrap_err().to_string(),
            "Missing status"
        );
        assert_eq!(
            s.service.update_status(order_id, Some("lost")).await.unwrap_err().to_string(),
            "Invalid status. Allowed values are: pending, processing, shipped, delivered, canceled"
        );
        assert_eq!(
            s.service.update_status(999, Some("shipped")).await.unwrap_err(),
            DomainError::not_found("Order")
        );

        s.service.update_status(order_id, Some("shipped")).await.unwrap();
        assert_eq!(
            subscription.next().await,
            Some(Notification::OrderStatusChanged {
                order_id,
                status: OrderStatus::Shipped
            })
        );
        let details = s.service.details(order_id).await.unwrap();
        assert_eq!(details.order.status, OrderStatus::Shipped);
        assert_eq!(details.customer.login, "alice");
    }
}
