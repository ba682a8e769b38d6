//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and provider decorators used
//! across multiple integration test files.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cachewrap::{CacheError, CacheProvider, CacheResult, ReturnShape};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Plain record type used as a cached return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

impl User {
    pub fn named(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Cache provider decorator that counts store interactions.
///
/// Wraps any provider and records how often each operation was issued,
/// so tests can assert on exact store traffic.
pub struct RecordingProvider<P> {
    inner: P,
    gets: AtomicUsize,
    sets: AtomicUsize,
    removes: AtomicUsize,
    prefix_removes: AtomicUsize,
}

impl<P> RecordingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            prefix_removes: AtomicUsize::new(0),
        }
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub fn prefix_removes(&self) -> usize {
        self.prefix_removes.load(Ordering::SeqCst)
    }

    /// Total operations of any kind issued against the store.
    pub fn store_interactions(&self) -> usize {
        self.gets() + self.sets() + self.removes() + self.prefix_removes()
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: CacheProvider> CacheProvider for RecordingProvider<P> {
    async fn get(&self, key: &str, shape: &ReturnShape) -> CacheResult<Option<Value>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key, shape).await
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key).await
    }

    async fn remove_by_prefix(&self, prefix: &str) -> CacheResult<()> {
        self.prefix_removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove_by_prefix(prefix).await
    }
}

/// Provider whose every operation fails, for store-outage tests.
pub struct FailingProvider;

#[async_trait]
impl CacheProvider for FailingProvider {
    async fn get(&self, _key: &str, _shape: &ReturnShape) -> CacheResult<Option<Value>> {
        Err(CacheError::Store("store unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: Value, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Store("store unavailable".to_string()))
    }

    async fn remove(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::Store("store unavailable".to_string()))
    }

    async fn remove_by_prefix(&self, _prefix: &str) -> CacheResult<()> {
        Err(CacheError::Store("store unavailable".to_string()))
    }
}
