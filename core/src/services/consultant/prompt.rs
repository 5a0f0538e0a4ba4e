//! Prompt assembly for the shopping consultant

use crate::domain::entities::consultant::ConsultantMessage;
use crate::domain::entities::order::OrderWithItems;
use crate::domain::entities::product::Product;
use crate::services::chat::ChatMessage;

/// Catalog line: name and price of every product
pub fn catalog_line(products: &[Product]) -> String {
    let listing = products
        .iter()
        .map(|p| format!("Product name: {}, Product price: {}", p.name, p.price))
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "Available products in store are: {}. Make sure to give information or advise about \
         products depending on list of available products. There is also price of every product \
         in BYN. If there isn't some product in this list, don't advise customer, just say that \
         we don't have one. You can shorten the names of products.",
        listing
    )
}

/// Order line: the caller's orders, oldest first
pub fn orders_line(orders: &[OrderWithItems]) -> String {
    let mut orders: Vec<_> = orders.iter().map(|o| &o.order).collect();
    orders.sort_by_key(|o| o.created_at);
    let listing = orders
        .iter()
        .map(|o| {
            format!(
                "Order ID: {}, Status: {}, Total price: {}, Was ordered at: {}",
                o.order_id,
                o.status,
                o.total_price,
                o.created_at.to_rfc3339()
            )
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!("The user's order details are: {}", listing)
}

/// Full message list: system preamble, then the stored conversation
///
/// `history` already ends with the customer's latest message.
pub fn consultant_messages(
    store_name: &str,
    products: &[Product],
    orders: &[OrderWithItems],
    history: &[ConsultantMessage],
) -> Vec<ChatMessage> {
    let mut messages = vec![
        ChatMessage::system(
            "If you can't handle the user's request, or really don't know what to answer, \
             recommend the user to call the call center to get the answer. But first, always \
             try to solve the problem yourself",
        ),
        ChatMessage::system(orders_line(orders)),
        ChatMessage::system(catalog_line(products)),
        ChatMessage::system("If the user asks about this store, you can give them information"),
        ChatMessage::system(format!(
            "You are working for an online store, the name of which is {}",
            store_name
        )),
        ChatMessage::system("You should answer only in 3-4 sentences"),
        ChatMessage::system("You are an online assistant in an online store of electronics"),
    ];

    messages.extend(history.iter().map(|entry| {
        if entry.is_client {
            ChatMessage::user(entry.message.clone())
        } else {
            ChatMessage::assistant(entry.message.clone())
        }
    }));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chat::ChatRole;
    use chrono::Utc;

    fn entry(message: &str, is_client: bool) -> ConsultantMessage {
        ConsultantMessage {
            id: 1,
            user_id: 1,
            message: message.to_string(),
            is_client,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn preamble_precedes_history_in_order() {
        let products = vec![Product {
            id: 1,
            name: "Phone".into(),
            description: "d".into(),
            price: 10.5,
            quantity_in_stock: 1,
            key_words: vec![],
            images: vec![],
        }];
        let history = vec![entry("hi", true), entry("hello!", false), entry("price?", true)];

        let messages = consultant_messages("Shop", &products, &[], &history);

        assert_eq!(messages.len(), 10);
        assert!(messages[..7].iter().all(|m| m.role == ChatRole::System));
        assert!(messages[2].content.contains("Product name: Phone, Product price: 10.5"));
        assert!(messages[4].content.ends_with("Shop"));
        assert_eq!(messages[7], ChatMessage::user("hi"));
        assert_eq!(messages[8], ChatMessage::assistant("hello!"));
        assert_eq!(messages[9], ChatMessage::user("price?"));
    }
}
