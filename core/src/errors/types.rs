//! Error types for authentication, token handling and request validation

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing token")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
}

/// Request validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Rendered as `Missing <field>`
    #[error("Missing {field}")]
    RequiredField { field: String },

    /// Free-form message shown to the client as is
    #[error("{message}")]
    Invalid { message: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredField { field: field.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid { message: message.into() }
    }
}
