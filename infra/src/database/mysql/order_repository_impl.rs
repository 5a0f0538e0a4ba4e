//! MySQL implementation of the OrderRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use std::collections::HashMap;

use sf_core::domain::entities::order::{
    CustomerOrder, CustomerSummary, NewOrder, Order, OrderDetails, OrderItem, OrderStatus,
    OrderWithItems,
};
use sf_core::domain::entities::user::Role;
use sf_core::errors::DomainError;
use sf_core::repositories::OrderRepository;

use super::{column, query_error};

const ORDER_COLUMNS: &str = "o.order_id, o.user_id, o.total_price, o.delivery_type, \
     o.address_lat, o.address_lng, o.status, o.created_at";

const ITEM_QUERY: &str = r#"
    SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price,
           p.name AS product_name, p.description AS product_description
    FROM order_items oi
    LEFT JOIN products p ON p.id = oi.product_id
"#;

pub struct MySqlOrderRepository {
    pool: MySqlPool,
}

impl MySqlOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_order(row: &MySqlRow) -> Result<Order, DomainError> {
        let status: String = column(row, "status")?;
        Ok(Order {
            order_id: column(row, "order_id")?,
            user_id: column(row, "user_id")?,
            total_price: column(row, "total_price")?,
            delivery_type: column(row, "delivery_type")?,
            address_lat: column(row, "address_lat")?,
            address_lng: column(row, "address_lng")?,
            status: status.parse::<OrderStatus>().map_err(DomainError::internal)?,
            created_at: column(row, "created_at")?,
        })
    }

    fn row_to_item(row: &MySqlRow) -> Result<OrderItem, DomainError> {
        Ok(OrderItem {
            id: column(row, "id")?,
            order_id: column(row, "order_id")?,
            product_id: column(row, "product_id")?,
            quantity: column(row, "quantity")?,
            price: column(row, "price")?,
            product_name: column(row, "product_name")?,
            product_description: column(row, "product_description")?,
        })
    }

    fn row_to_customer(row: &MySqlRow) -> Result<CustomerSummary, DomainError> {
        let role: String = column(row, "role")?;
        Ok(CustomerSummary {
            login: column(row, "login")?,
            email: column(row, "email")?,
            role: role.parse::<Role>().map_err(DomainError::internal)?,
            name: column(row, "name")?,
            number: column(row, "number")?,
        })
    }

    async fn items_of(&self, order_id: i64) -> Result<Vec<OrderItem>, DomainError> {
        let query = format!("{} WHERE oi.order_id = ? ORDER BY oi.id", ITEM_QUERY);
        let rows = sqlx::query(&query)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<i64, DomainError> {
        // Dropping the transaction on an early return rolls it back
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (user_id, total_price, delivery_type, address_lat, address_lng, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.user_id)
        .bind(order.total_price)
        .bind(&order.delivery_type)
        .bind(order.address_lat)
        .bind(order.address_lng)
        .bind(OrderStatus::default().as_str())
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        let order_id = result.last_insert_id() as i64;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, price) VALUES (?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;
        }

        tx.commit().await.map_err(query_error)?;
        tracing::debug!(order_id, items = order.items.len(), "Order committed");
        Ok(order_id)
    }

    async fn find_by_id(&self, order_id: i64) -> Result<Option<Order>, DomainError> {
        let query = format!("SELECT {} FROM orders o WHERE o.order_id = ?", ORDER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_order).transpose()
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<OrderWithItems>, DomainError> {
        let query = format!(
            "SELECT {} FROM orders o WHERE o.user_id = ? ORDER BY o.order_id",
            ORDER_COLUMNS
        );
        let order_rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let item_query = format!(
            "{} JOIN orders o ON o.order_id = oi.order_id WHERE o.user_id = ? ORDER BY oi.id",
            ITEM_QUERY
        );
        let item_rows = sqlx::query(&item_query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let mut items: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let item = Self::row_to_item(row)?;
            items.entry(item.order_id).or_default().push(item);
        }

        order_rows
            .iter()
            .map(|row| {
                let order = Self::row_to_order(row)?;
                let items = items.remove(&order.order_id).unwrap_or_default();
                Ok(OrderWithItems { order, items })
            })
            .collect()
    }

    async fn list_with_customers(&self) -> Result<Vec<CustomerOrder>, DomainError> {
        let query = format!(
            r#"
            SELECT {}, u.login, u.email, u.role, u.name, u.number
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ORDER BY o.order_id
            "#,
            ORDER_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                Ok(CustomerOrder {
                    order: Self::row_to_order(row)?,
                    customer: Self::row_to_customer(row)?,
                })
            })
            .collect()
    }

    async fn find_details(&self, order_id: i64) -> Result<Option<OrderDetails>, DomainError> {
        let query = format!(
            r#"
            SELECT {}, u.login, u.email, u.role, u.name, u.number
            FROM orders o
            JOIN users u ON u.id = o.user_id
            WHERE o.order_id = ?
            "#,
            ORDER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(OrderDetails {
            order: Self::row_to_order(&row)?,
            customer: Self::row_to_customer(&row)?,
            items: self.items_of(order_id).await?,
        }))
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE order_id = ?")
            .bind(status.as_str())
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        // Setting the current status again affects no rows
        Ok(self.find_by_id(order_id).await?.is_some())
    }
}
