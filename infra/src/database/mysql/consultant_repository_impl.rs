//! MySQL implementation of the ConsultantRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use sf_core::domain::entities::consultant::{ConsultantMessage, SearchLogEntry};
use sf_core::errors::DomainError;
use sf_core::repositories::ConsultantRepository;

use super::{column, query_error};

pub struct MySqlConsultantRepository {
    pool: MySqlPool,
}

impl MySqlConsultantRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_message(row: &MySqlRow) -> Result<ConsultantMessage, DomainError> {
        Ok(ConsultantMessage {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            message: column(row, "message")?,
            is_client: column(row, "is_client")?,
            timestamp: column(row, "timestamp")?,
        })
    }
}

#[async_trait]
impl ConsultantRepository for MySqlConsultantRepository {
    async fn append_message(
        &self,
        user_id: i64,
        message: &str,
        is_client: bool,
    ) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO consultant_messages (user_id, message, is_client) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(message)
            .bind(is_client)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn conversation(&self, user_id: i64) -> Result<Vec<ConsultantMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, message, is_client, timestamp
            FROM consultant_messages
            WHERE user_id = ?
            ORDER BY timestamp, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn log_search(&self, entry: SearchLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO search_logs (user_id, request_message, response_message, tokens_used)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.request_message)
        .bind(&entry.response_message)
        .bind(entry.tokens_used)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;
        Ok(())
    }
}
