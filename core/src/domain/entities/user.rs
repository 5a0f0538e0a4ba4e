//! Account entity and the role model used by authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of roles an account can hold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role at registration
    #[default]
    Customer,
    /// Granted only by editing the store directly
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique login name
    pub login: String,

    /// bcrypt digest, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub email: Option<String>,

    /// Phone number
    pub number: Option<String>,

    pub name: Option<String>,

    pub role: Role,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub number: Option<String>,
    pub name: Option<String>,
}

/// Partial update of an account; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub number: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.number.is_none()
    }

    /// Apply the patch to an in-memory account
    pub fn apply_to(&self, user: &mut User) {
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
        if let Some(number) = &self.number {
            user.number = Some(number.clone());
        }
        user.updated_at = Utc::now();
    }
}
