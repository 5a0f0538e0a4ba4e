use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_core::domain::entities::{address::Address, user::User};
use sf_core::services::auth::{ProfileUpdate, RegisterCommand};

use super::non_empty;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub number: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(request: RegisterRequest) -> Self {
        Self {
            login: request.login,
            password: request.password,
            email: non_empty(request.email),
            number: non_empty(request.number),
            name: non_empty(request.name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Profile change; empty strings leave the field unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub number: Option<String>,
}

impl From<UpdateUserRequest> for ProfileUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            password: non_empty(request.password),
            name: non_empty(request.name),
            email: non_empty(request.email),
            number: non_empty(request.number),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
    pub addresses: Vec<Address>,
}
