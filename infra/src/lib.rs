//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared in `sf_core`:
//! - **Database**: MySQL repositories using SQLx, with embedded migrations
//! - **Chat**: HTTP client for the chat-completion API used by the
//!   consultant and AI search

pub use sf_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Chat-completion clients
pub mod chat;

pub use chat::OpenAiChatClient;
pub use database::{
    DatabasePool, MySqlAddressRepository, MySqlConsultantRepository, MySqlOrderRepository,
    MySqlProductRepository, MySqlUserRepository,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(String),

    /// HTTP client error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
