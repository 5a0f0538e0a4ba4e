//! Shopping consultant conversation

use std::sync::Arc;

use sf_shared::config::ConsultantConfig;

use crate::domain::entities::consultant::ConsultantMessage;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::{ConsultantRepository, OrderRepository, ProductRepository};
use crate::services::chat::{ChatCompletion, ChatRequest};

use super::prompt::consultant_messages;

pub struct ConsultantService {
    messages: Arc<dyn ConsultantRepository>,
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
    chat: Arc<dyn ChatCompletion>,
    config: ConsultantConfig,
}

impl ConsultantService {
    pub fn new(
        messages: Arc<dyn ConsultantRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        chat: Arc<dyn ChatCompletion>,
        config: ConsultantConfig,
    ) -> Self {
        Self {
            messages,
            products,
            orders,
            chat,
            config,
        }
    }

    /// Store the customer's message, ask the assistant, store its reply
    ///
    /// Returns the whole conversation, oldest first.
    pub async fn send_message(
        &self,
        user_id: i64,
        message: &str,
    ) -> DomainResult<Vec<ConsultantMessage>> {
        if message.trim().is_empty() {
            return Err(ValidationError::required("required fields").into());
        }

        self.messages.append_message(user_id, message, true).await?;

        let history = self.messages.conversation(user_id).await?;
        let products = self.products.list().await?;
        let orders = self.orders.find_by_user(user_id).await?;

        let request = ChatRequest {
            model: self.config.consultant_model.clone(),
            messages: consultant_messages(&self.config.store_name, &products, &orders, &history),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let reply = self.chat.complete(&request).await.map_err(|e| {
            tracing::error!(user_id, error = %e, "Consultant completion failed");
            e
        })?;

        self.messages
            .append_message(user_id, &reply.content, false)
            .await?;
        self.messages.conversation(user_id).await
    }
}
