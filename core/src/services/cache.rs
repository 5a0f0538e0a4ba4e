//! Fixed-TTL in-process cache for a single loaded value

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::errors::DomainError;

struct Entry<T> {
    loaded_at: Instant,
    value: Arc<T>,
}

/// Holds one value for at most `ttl`; the first caller after expiry reloads it
pub struct TtlCache<T> {
    ttl: Duration,
    entry: RwLock<Option<Entry<T>>>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Cached value, or the result of `load` when empty or expired
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<T>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        if let Some(entry) = self.entry.read().await.as_ref() {
            if entry.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let mut slot = self.entry.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(entry) = slot.as_ref() {
            if entry.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(load().await?);
        *slot = Some(Entry {
            loaded_at: Instant::now(),
            value: Arc::clone(&value),
        });
        Ok(value)
    }

    /// Drop the cached value so the next read reloads
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }
}
