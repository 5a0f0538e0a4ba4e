//! Request and response bodies

pub mod address;
pub mod consultant;
pub mod order;
pub mod product;
pub mod search;
pub mod user;

/// Treat empty strings like absent fields
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
