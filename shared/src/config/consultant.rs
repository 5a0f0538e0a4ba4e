//! Chat-completion (shopping consultant and AI search) configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Settings for the OpenAI-compatible chat-completion API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsultantConfig {
    /// Bearer key, requests fail with an upstream error when unset
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL, `/v1/chat/completions` is appended
    pub api_base_url: String,

    /// Model used by the consultant conversation
    pub consultant_model: String,

    /// Model used by AI product search
    pub search_model: String,

    /// Reply token limit for consultant messages
    pub max_tokens: u32,

    /// Sampling temperature for consultant messages
    pub temperature: f32,

    /// HTTP timeout in seconds
    pub request_timeout_secs: u64,

    /// Store name used in the consultant persona
    pub store_name: String,
}

impl Default for ConsultantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: String::from("https://api.openai.com"),
            consultant_model: String::from("gpt-4"),
            search_model: String::from("gpt-3.5-turbo"),
            max_tokens: 300,
            temperature: 0.5,
            request_timeout_secs: 30,
            store_name: String::from("Devik.by"),
        }
    }
}

impl ConsultantConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty()),
            api_base_url: std::env::var("OPENAI_API_BASE_URL").unwrap_or(defaults.api_base_url),
            consultant_model: std::env::var("CONSULTANT_MODEL").unwrap_or(defaults.consultant_model),
            search_model: std::env::var("SEARCH_MODEL").unwrap_or(defaults.search_model),
            max_tokens: env_or("CONSULTANT_MAX_TOKENS", defaults.max_tokens),
            temperature: env_or("CONSULTANT_TEMPERATURE", defaults.temperature),
            request_timeout_secs: env_or("OPENAI_TIMEOUT_SECS", defaults.request_timeout_secs),
            store_name: std::env::var("STORE_NAME").unwrap_or(defaults.store_name),
        }
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_base_url.trim_end_matches('/'))
    }
}
