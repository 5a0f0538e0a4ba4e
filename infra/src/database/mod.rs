//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management, embedded migrations and the repository
//! implementations for every core repository trait.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{
    MySqlAddressRepository, MySqlConsultantRepository, MySqlOrderRepository,
    MySqlProductRepository, MySqlUserRepository,
};
