//! Product search: chat-model assisted and fuzzy

mod ai;
pub mod fuzzy;
mod service;

pub use ai::{parse_reply, search_messages, SearchHit, MAX_NAME_CHARS};
pub use service::{FuzzyHit, ProductSummary, SearchService, FUZZY_THRESHOLD};
