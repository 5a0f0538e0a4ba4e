//! Deployment environment, read from `ENVIRONMENT` (or `APP_ENV`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the server is running; decides log verbosity and secret checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Unknown or missing values fall back to development
    pub fn from_env() -> Self {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("APP_ENV"))
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// `env_logger` filter used when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Staging => "info",
            Environment::Production => "warn",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Invalid environment: {}", other)),
        }
    }
}
