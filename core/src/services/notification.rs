//! Per-account order notifications fanned out over a broadcast channel

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::domain::entities::order::OrderStatus;

/// Event pushed to a connected client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    OrderCreated { order_id: i64 },
    OrderStatusChanged { order_id: i64, status: OrderStatus },
}

#[derive(Debug, Clone)]
struct Envelope {
    user_id: i64,
    notification: Notification,
}

/// Cloneable handle to the shared channel
#[derive(Debug, Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<Envelope>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send to every subscription of `user_id`; returns the number of live receivers
    pub fn publish(&self, user_id: i64, notification: Notification) -> usize {
        // No receivers is the normal idle case
        self.sender
            .send(Envelope {
                user_id,
                notification,
            })
            .unwrap_or(0)
    }

    pub fn subscribe(&self, user_id: i64) -> Subscription {
        Subscription {
            user_id,
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Receiving side filtered to one account
pub struct Subscription {
    user_id: i64,
    receiver: broadcast::Receiver<Envelope>,
}

impl Subscription {
    /// Next event for this account; `None` once the hub is gone
    ///
    /// A lagging subscriber skips the events it missed.
    pub async fn next(&mut self) -> Option<Notification> {
        loop {
            match self.receiver.recv().await {
                Ok(envelope) if envelope.user_id == self.user_id => {
                    return Some(envelope.notification)
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(user_id = self.user_id, skipped, "Notification subscriber lagged");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_tagged() {
        let json = serde_json::to_value(Notification::OrderStatusChanged {
            order_id: 4,
            status: OrderStatus::Shipped,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "order_status_changed", "order_id": 4, "status": "shipped"})
        );
    }

    #[tokio::test]
    async fn subscribers_only_see_their_own_events() {
        let hub = NotificationHub::new(16);
        let mut alice = hub.subscribe(1);
        let mut bob = hub.subscribe(2);

        hub.publish(2, Notification::OrderCreated { order_id: 10 });
        hub.publish(1, Notification::OrderCreated { order_id: 11 });

        assert_eq!(alice.next().await, Some(Notification::OrderCreated { order_id: 11 }));
        assert_eq!(bob.next().await, Some(Notification::OrderCreated { order_id: 10 }));
    }

    #[tokio::test]
    async fn lagging_subscriber_skips_missed_events() {
        let hub = NotificationHub::new(2);
        let mut alice = hub.subscribe(1);

        for order_id in 0..5 {
            hub.publish(1, Notification::OrderCreated { order_id });
        }

        assert_eq!(alice.next().await, Some(Notification::OrderCreated { order_id: 3 }));
        assert_eq!(alice.next().await, Some(Notification::OrderCreated { order_id: 4 }));
    }

    #[tokio::test]
    async fn closed_hub_ends_subscription() {
        let hub = NotificationHub::new(4);
        let mut alice = hub.subscribe(1);
        drop(hub);
        assert_eq!(alice.next().await, None);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let hub = NotificationHub::default();
        assert_eq!(hub.publish(1, Notification::OrderCreated { order_id: 1 }), 0);
    }
}
