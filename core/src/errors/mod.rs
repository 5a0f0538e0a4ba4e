//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Persistence failure, message passed through to the client
    #[error("{message}")]
    Database { message: String },

    /// Chat-completion API failure
    #[error("Upstream service error: {message}")]
    Upstream { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream { message: message.into() }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
