//! In-process cache provider with TTL and prefix removal.
//!
//! Backed by a lock-protected map; expired entries read as absent and
//! are dropped on access. Carries no eviction policy of its own.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::errors::CacheResult;
use crate::domain::models::method::ReturnShape;
use crate::domain::ports::CacheProvider;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory [`CacheProvider`].
///
/// Suitable for single-process deployments and tests. Operations are
/// atomic at single-key granularity.
#[derive(Debug, Default)]
pub struct MemoryCacheProvider {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheProvider {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including not-yet-dropped
    /// expired ones.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether a live entry exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str, shape: &ReturnShape) -> CacheResult<Option<Value>> {
        let now = Instant::now();

        let raw = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.is_expired(now) => None,
                Some(entry) => Some(entry.value.clone()),
            }
        };

        match raw {
            Some(value) => Ok(Some(shape.convert(value)?)),
            None => {
                // Drop the expired entry, re-checking under the write lock
                let mut entries = self.entries.write().await;
                if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
                    entries.remove(key);
                }
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> CacheResult<()> {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn remove_by_prefix(&self, prefix: &str) -> CacheResult<()> {
        self.entries
            .write()
            .await
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
