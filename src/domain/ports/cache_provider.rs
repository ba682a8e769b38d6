//! Port for the backing cache store.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::CacheResult;
use crate::domain::models::method::ReturnShape;

/// Backing store for cached values.
///
/// Implementations are assumed correct and resilient on their own; the
/// interception pipeline does not retry or fall back when a store
/// operation fails. Each operation is atomic at single-key granularity;
/// no ordering is guaranteed across operations issued by different
/// phases of the same invocation.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Look up a value and convert it to the requested return type.
    ///
    /// Returns `None` when no live entry exists for `key`.
    ///
    /// # Errors
    /// Returns an error if the store is unavailable or the stored value
    /// cannot be converted to the type described by `shape`.
    async fn get(&self, key: &str, shape: &ReturnShape) -> CacheResult<Option<Value>>;

    /// Store a value under `key` for `ttl`.
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> CacheResult<()>;

    /// Remove the entry under `key`, if any.
    async fn remove(&self, key: &str) -> CacheResult<()>;

    /// Remove every entry whose key starts with `prefix`.
    async fn remove_by_prefix(&self, prefix: &str) -> CacheResult<()>;
}
