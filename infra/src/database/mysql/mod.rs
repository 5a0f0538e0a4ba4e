//! MySQL implementations of the core repository traits

mod address_repository_impl;
mod consultant_repository_impl;
mod order_repository_impl;
mod product_repository_impl;
mod user_repository_impl;

pub use address_repository_impl::MySqlAddressRepository;
pub use consultant_repository_impl::MySqlConsultantRepository;
pub use order_repository_impl::MySqlOrderRepository;
pub use product_repository_impl::MySqlProductRepository;
pub use user_repository_impl::MySqlUserRepository;

use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};

use sf_core::errors::DomainError;

/// Read one column, reporting a decode failure as an internal error
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

/// Query failures keep the driver's message
pub(crate) fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Database query failed");
    DomainError::database(e.to_string())
}
