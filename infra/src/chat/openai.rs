//! OpenAI chat-completions client
//!
//! Implements the core `ChatCompletion` port over the `/v1/chat/completions`
//! endpoint. Every failure, including a missing API key, is reported to the
//! caller as `DomainError::Upstream`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use sf_core::errors::DomainError;
use sf_core::services::chat::{ChatCompletion, ChatMessage, ChatReply, ChatRequest};
use sf_shared::config::ConsultantConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Extract the first choice, trimmed
fn into_reply(response: CompletionResponse) -> Result<ChatReply, DomainError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| DomainError::upstream("Chat completion returned no choices"))?;

    Ok(ChatReply {
        content: content.trim().to_string(),
        total_tokens: response.usage.map(|usage| usage.total_tokens),
    })
}

/// Chat-completion client backed by the OpenAI HTTP API
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: Option<String>,
    url: String,
}

impl OpenAiChatClient {
    pub fn new(config: &ConsultantConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        if config.api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; consultant and AI search requests will fail");
        } else {
            info!("Chat completion client initialized for {}", config.api_base_url);
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: config.completions_url(),
        })
    }
}

#[async_trait]
impl ChatCompletion for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::upstream("Chat completion API key is not configured"))?;

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let body = CompletionRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                DomainError::upstream(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("Chat completion returned {}: {}", status, text);
            return Err(DomainError::upstream(format!(
                "Chat completion returned {}",
                status
            )));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to decode chat completion response: {}", e);
            DomainError::upstream(e.to_string())
        })?;

        into_reply(parsed)
    }
}
