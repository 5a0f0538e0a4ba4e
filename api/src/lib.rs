//! HTTP surface of the storefront backend
//!
//! Exposed as a library so the integration tests can build the same
//! application the binary serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::{configure, create_app};
pub use state::{AppState, Repositories};
