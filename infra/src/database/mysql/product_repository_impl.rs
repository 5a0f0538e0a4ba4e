//! MySQL implementation of the ProductRepository trait.
//!
//! Image URLs live in `product_images`; key words are stored as one
//! comma-separated column.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Transaction};
use std::collections::HashMap;

use sf_core::domain::entities::product::{
    join_key_words, split_key_words, NewProduct, Product, ProductPatch,
};
use sf_core::errors::DomainError;
use sf_core::repositories::ProductRepository;

use super::{column, query_error};

const PRODUCT_COLUMNS: &str = "id, name, description, price, quantity_in_stock, key_words";

pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: &MySqlRow, images: Vec<String>) -> Result<Product, DomainError> {
        let key_words: String = column(row, "key_words")?;
        Ok(Product {
            id: column(row, "id")?,
            name: column(row, "name")?,
            description: column(row, "description")?,
            price: column(row, "price")?,
            quantity_in_stock: column(row, "quantity_in_stock")?,
            key_words: split_key_words(&key_words),
            images,
        })
    }

    async fn insert_images(
        tx: &mut Transaction<'_, MySql>,
        product_id: i64,
        urls: &[String],
    ) -> Result<(), DomainError> {
        for url in urls {
            sqlx::query("INSERT INTO product_images (product_id, image_url) VALUES (?, ?)")
                .bind(product_id)
                .bind(url)
                .execute(&mut **tx)
                .await
                .map_err(query_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let query = format!("SELECT {} FROM products ORDER BY id", PRODUCT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let image_rows = sqlx::query("SELECT product_id, image_url FROM product_images ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;

        let mut images: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &image_rows {
            let product_id: i64 = column(row, "product_id")?;
            images
                .entry(product_id)
                .or_default()
                .push(column(row, "image_url")?);
        }

        rows.iter()
            .map(|row| {
                let id: i64 = column(row, "id")?;
                Self::row_to_product(row, images.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let query = format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let image_rows =
            sqlx::query("SELECT image_url FROM product_images WHERE product_id = ? ORDER BY id")
                .bind(id)
                .fetch_all(&self.pool)
                .await
                .map_err(query_error)?;
        let images = image_rows
            .iter()
            .map(|r| column(r, "image_url"))
            .collect::<Result<Vec<String>, _>>()?;

        Self::row_to_product(&row, images).map(Some)
    }

    async fn create(&self, product: NewProduct) -> Result<i64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, quantity_in_stock, key_words)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity_in_stock)
        .bind(join_key_words(&product.key_words))
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        let id = result.last_insert_id() as i64;
        Self::insert_images(&mut tx, id, &product.image_urls).await?;

        tx.commit().await.map_err(query_error)?;
        Ok(id)
    }

    async fn update(&self, id: i64, patch: &ProductPatch) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        let existing = sqlx::query("SELECT id FROM products WHERE id = ? FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;
        if existing.is_none() {
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE products SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                quantity_in_stock = COALESCE(?, quantity_in_stock),
                key_words = COALESCE(?, key_words)
            WHERE id = ?
            "#,
        )
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(patch.quantity_in_stock)
        .bind(patch.key_words.as_deref().map(join_key_words))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        if let Some(urls) = &patch.image_urls {
            sqlx::query("DELETE FROM product_images WHERE product_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(query_error)?;
            Self::insert_images(&mut tx, id, urls).await?;
        }

        tx.commit().await.map_err(query_error)?;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
