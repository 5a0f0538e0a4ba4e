//! Authentication service module
//!
//! - account registration and password login
//! - self-service profile reads and updates
//! - request authorization guards

mod config;
mod guard;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use guard::{bearer_token, ensure_owner, require_role, Authorizer, Identity, Rejection};
pub use service::{AuthService, Profile, ProfileUpdate, RegisterCommand};
