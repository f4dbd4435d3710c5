//! Cache Backend Module
//!
//! The async seam the coordinator talks to, and the in-process
//! implementation backed by [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheError, CacheStats, CacheStore};

type Result<T> = std::result::Result<T, CacheError>;

/// Key/value and list store with per-key TTL.
///
/// Each call is atomic for its own key. Sequences of calls are not, and
/// callers must not assume otherwise.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value under `key`. Absence is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value and TTL.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Removes `key`. A miss is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Appends `value` to the list under `key` and returns the list length.
    async fn append_list(&self, key: &str, value: String) -> Result<usize>;

    /// Replaces the whole list under `key` and its TTL as one command.
    /// An empty `values` leaves the key absent. Returns the list length.
    async fn replace_list(&self, key: &str, values: Vec<String>, ttl: Duration) -> Result<usize>;

    /// Returns the whole list under `key`; empty when absent.
    async fn list_range(&self, key: &str) -> Result<Vec<String>>;

    /// Sets the TTL of the whole key. Returns false when the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Snapshot of hit/miss counters and the current key count.
    async fn stats(&self) -> Result<CacheStats>;
}

// == Memory Cache ==
/// In-process [`CacheBackend`] sharing one [`CacheStore`] behind a lock.
#[derive(Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Handle to the underlying store, for the cleanup task.
    pub fn shared(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // write lock: reads update LRU order and stats
        self.store.write().await.get(key)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.store.write().await.set(key, value, ttl)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.write().await.delete(key);
        Ok(())
    }

    async fn append_list(&self, key: &str, value: String) -> Result<usize> {
        self.store.write().await.append_list(key, value)
    }

    async fn replace_list(&self, key: &str, values: Vec<String>, ttl: Duration) -> Result<usize> {
        // one lock acquisition, so readers never observe a partial list
        self.store.write().await.replace_list(key, values, ttl)
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>> {
        self.store.write().await.list_range(key)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        Ok(self.store.write().await.expire(key, ttl))
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(self.store.read().await.stats())
    }
}
