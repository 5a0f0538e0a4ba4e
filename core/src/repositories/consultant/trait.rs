//! Consultant conversation and search log persistence.

use async_trait::async_trait;

use crate::domain::entities::consultant::{ConsultantMessage, SearchLogEntry};
use crate::errors::DomainError;

#[async_trait]
pub trait ConsultantRepository: Send + Sync {
    /// Store one conversation entry
    async fn append_message(
        &self,
        user_id: i64,
        message: &str,
        is_client: bool,
    ) -> Result<(), DomainError>;

    /// Full conversation of `user_id`, oldest first
    async fn conversation(&self, user_id: i64) -> Result<Vec<ConsultantMessage>, DomainError>;

    /// Record an AI search request and its reply
    async fn log_search(&self, entry: SearchLogEntry) -> Result<(), DomainError>;
}
