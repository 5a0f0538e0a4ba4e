//! Chat-completion port used by the consultant and AI search

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// First choice, trimmed
    pub content: String,
    pub total_tokens: Option<u32>,
}

/// External chat-completion service
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Failures are reported as `DomainError::Upstream`
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, DomainError>;
}

/// Scripted chat-completion client for tests and offline runs
pub struct MockChatCompletion {
    reply: Result<ChatReply, String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatCompletion {
    /// Always answer with `content`
    pub fn replying(content: impl Into<String>) -> Self {
        Self {
            reply: Ok(ChatReply {
                content: content.into(),
                total_tokens: Some(42),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with an upstream error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChatCompletion for MockChatCompletion {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, DomainError> {
        self.requests.lock().await.push(request.clone());
        self.reply.clone().map_err(DomainError::upstream)
    }
}
