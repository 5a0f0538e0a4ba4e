//! Prompt and reply format for AI product search
//!
//! The model is asked to answer with `{product name}, {product id};` records.

use serde::{Deserialize, Serialize};

use crate::domain::entities::product::Product;
use crate::services::chat::ChatMessage;

/// Names longer than this are cut and suffixed with `...`
pub const MAX_NAME_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub product_id: i64,
    pub product_name: String,
}

pub fn search_messages(products: &[Product], query: &str) -> Vec<ChatMessage> {
    let listing = products
        .iter()
        .map(|p| {
            format!(
                "Product name: {}, Product description: {}, Product id: {};",
                p.name, p.description, p.id
            )
        })
        .collect::<Vec<_>>()
        .join(",");

    vec![
        ChatMessage::system(format!("Available product list: {}", listing)),
        ChatMessage::system(
            "You are a search engine in online store of electronics. You have a list of \
             products, and you will receive queries from users, and you should return in this \
             scheme (DATA ONLY): '{product name}, {products id};', which user asked for",
        ),
        ChatMessage::user(query),
    ]
}

/// Parse `name, id;` records; blank or id-less records are dropped
pub fn parse_reply(reply: &str) -> Vec<SearchHit> {
    reply
        .split(';')
        .filter_map(|record| {
            let (name, id) = record.trim().rsplit_once(',')?;
            let id = id.trim().trim_start_matches(|c: char| !c.is_ascii_digit());
            Some(SearchHit {
                product_id: id.parse().ok()?,
                product_name: truncate(name.trim(), MAX_NAME_CHARS),
            })
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
