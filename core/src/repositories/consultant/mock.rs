//! In-memory implementation of ConsultantRepository

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::consultant::{ConsultantMessage, SearchLogEntry};
use crate::errors::DomainError;

use super::trait_::ConsultantRepository;

#[derive(Default)]
struct State {
    messages: Vec<ConsultantMessage>,
    search_logs: Vec<SearchLogEntry>,
}

/// Mock consultant repository for testing
#[derive(Default)]
pub struct MockConsultantRepository {
    state: RwLock<State>,
}

impl MockConsultantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn search_logs(&self) -> Vec<SearchLogEntry> {
        self.state.read().await.search_logs.clone()
    }
}

#[async_trait]
impl ConsultantRepository for MockConsultantRepository {
    async fn append_message(
        &self,
        user_id: i64,
        message: &str,
        is_client: bool,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let id = state.messages.len() as i64 + 1;
        state.messages.push(ConsultantMessage {
            id,
            user_id,
            message: message.to_string(),
            is_client,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn conversation(&self, user_id: i64) -> Result<Vec<ConsultantMessage>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn log_search(&self, entry: SearchLogEntry) -> Result<(), DomainError> {
        self.state.write().await.search_logs.push(entry);
        Ok(())
    }
}
