//! Chat-completion clients

pub mod openai;

pub use openai::OpenAiChatClient;
