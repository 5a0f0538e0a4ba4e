//! Database connection pool management

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use sf_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Shared MySQL pool used by every repository
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(max_connections = config.max_connections, "Opening MySQL pool");

        let connect_options = connect_options(&config.url)?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "MySQL pool could not connect");
                InfrastructureError::Database(e)
            })?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip a trivial query; `true` when the server answered `1`
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let value: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "MySQL health check failed");
                InfrastructureError::Database(e)
            })?;
        Ok(value == 1)
    }

    /// Apply the embedded schema migrations
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| InfrastructureError::Migration(e.to_string()))?;
        tracing::info!("Schema migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL pool closed");
    }
}

/// Parse a `mysql://` URL into connect options with statement logging
fn connect_options(url: &str) -> Result<MySqlConnectOptions, InfrastructureError> {
    if !(url.starts_with("mysql://") || url.starts_with("mariadb://")) {
        return Err(InfrastructureError::Config(format!(
            "Invalid database URL: expected a mysql:// URL, got {}",
            url.split("://").next().unwrap_or_default()
        )));
    }

    let options = MySqlConnectOptions::from_str(url)
        .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));
    Ok(options)
}
