//! Mapping of domain failures and authorization rejections onto HTTP responses
//!
//! Every error body has the shape `{"error": "<message>"}`.

use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use std::fmt;

use sf_core::errors::{AuthError, DomainError, TokenError};
use sf_core::services::auth::Rejection;
use sf_shared::types::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    Rejected(Rejection),
    BadRequest(String),
    /// 404 with a message other than `<resource> not found`
    NotFound(String),
    /// Generic 500 whose cause is only logged
    Internal,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    fn message(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Token(TokenError::MissingToken)) => {
                Rejection::MissingToken.message().to_string()
            }
            ApiError::Domain(DomainError::Token(TokenError::TokenGenerationFailed(_))) => {
                "Failed to issue token".to_string()
            }
            ApiError::Domain(DomainError::Token(_)) => Rejection::InvalidToken.message().to_string(),
            ApiError::Domain(DomainError::Database { message })
            | ApiError::Domain(DomainError::Internal { message })
            | ApiError::Domain(DomainError::Upstream { message }) => message.clone(),
            ApiError::Domain(other) => other.to_string(),
            ApiError::Rejected(rejection) => rejection.message().to_string(),
            ApiError::BadRequest(message) | ApiError::NotFound(message) => message.clone(),
            ApiError::Internal => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_status(error),
            ApiError::Rejected(rejection) => StatusCode::from_u16(rejection.status_code())
                .unwrap_or(StatusCode::FORBIDDEN),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed with {}: {}", status, self.message());
        }
        HttpResponse::build(status).json(ErrorResponse::new(self.message()))
    }
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::InvalidPassword | AuthError::AuthenticationFailed => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        },
        DomainError::Token(token) => match token {
            TokenError::MissingToken => StatusCode::UNAUTHORIZED,
            TokenError::TokenGenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::FORBIDDEN,
        },
        DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Database { .. }
        | DomainError::Upstream { .. }
        | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        ApiError::Rejected(rejection)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ApiError::BadRequest(format!("Invalid {}", fields.join(", ")))
    }
}

/// Malformed JSON bodies are client errors
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    ApiError::bad_request(format!("Invalid request body: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn rejections_render_fixed_messages() {
        let (status, body) = body_of(Rejection::MissingToken.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "error": "Missing token" }));

        let (status, body) = body_of(Rejection::InvalidToken.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Invalid token");
    }

    #[actix_web::test]
    async fn domain_errors_follow_the_taxonomy() {
        let cases = [
            (DomainError::Auth(AuthError::UserAlreadyExists), 409, "User already exists"),
            (DomainError::Auth(AuthError::UserNotFound), 404, "User not found"),
            (DomainError::Auth(AuthError::InvalidPassword), 401, "Invalid password"),
            (DomainError::not_found("Order"), 404, "Order not found"),
            (DomainError::database("Duplicate entry"), 500, "Duplicate entry"),
            (DomainError::Token(TokenError::TokenExpired), 403, "Invalid token"),
        ];

        for (error, status, message) in cases {
            let (actual_status, body) = body_of(error.into()).await;
            assert_eq!(actual_status.as_u16(), status);
            assert_eq!(body["error"], message);
        }
    }

    #[actix_web::test]
    async fn internal_hides_the_cause() {
        let (status, body) = body_of(ApiError::Internal).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
