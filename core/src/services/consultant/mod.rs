//! Shopping consultant backed by a chat-completion service

mod prompt;
mod service;

pub use prompt::{catalog_line, consultant_messages, orders_line};
pub use service::ConsultantService;
