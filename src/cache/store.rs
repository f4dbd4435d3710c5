//! Cache Store Module
//!
//! Ephemeral key/value and list store with per-key TTL and LRU eviction.
//! Expired keys are treated as absent and removed lazily on access or by the
//! cleanup task.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{
    CacheEntry, CacheError, CacheStats, CachedValue, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE,
};

type Result<T> = std::result::Result<T, CacheError>;

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore bounded to `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
        }
    }

    fn validate_key(key: &str) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong {
                max: MAX_KEY_LENGTH,
            });
        }
        Ok(())
    }

    fn validate_size(size: usize) -> Result<()> {
        if size > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge {
                max: MAX_VALUE_SIZE,
            });
        }
        Ok(())
    }

    /// Drops `key` if its TTL has elapsed. Returns true when it was removed.
    fn purge_if_expired(&mut self, key: &str) -> bool {
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);
        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
        }
        expired
    }

    /// Makes room for a new key, evicting the least recently used one.
    fn reserve_slot(&mut self, key: &str) -> Result<()> {
        if self.entries.contains_key(key) || self.entries.len() < self.max_entries {
            return Ok(());
        }
        match self.lru.evict_oldest() {
            Some(evicted) => {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                Ok(())
            }
            None => Err(CacheError::CacheFull),
        }
    }

    // == Set ==
    /// Stores a string value under `key`, replacing any prior value and TTL.
    pub fn set(&mut self, key: &str, value: String, ttl: Duration) -> Result<()> {
        Self::validate_key(key)?;
        Self::validate_size(value.len())?;

        self.purge_if_expired(key);
        self.reserve_slot(key)?;

        let entry = CacheEntry::new(CachedValue::Text(value), Some(ttl));
        self.entries.insert(key.to_string(), entry);
        self.lru.touch(key);
        Ok(())
    }

    // == Get ==
    /// Returns the string stored under `key`, or None if absent or expired.
    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.purge_if_expired(key);

        let value = match self.entries.get(key) {
            Some(CacheEntry {
                value: CachedValue::Text(value),
                ..
            }) => value.clone(),
            Some(entry) => {
                return Err(CacheError::WrongType {
                    key: key.to_string(),
                    found: entry.value.type_name(),
                })
            }
            None => {
                self.stats.record_miss();
                return Ok(None);
            }
        };

        self.stats.record_hit();
        self.lru.touch(key);
        Ok(Some(value))
    }

    // == Delete ==
    /// Removes `key`. Returns whether a live entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let expired = self.purge_if_expired(key);
        if expired {
            return false;
        }
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == Append List ==
    /// Appends `value` to the list under `key`, creating it without a TTL
    /// when absent. An existing TTL is kept. Returns the new list length.
    pub fn append_list(&mut self, key: &str, value: String) -> Result<usize> {
        Self::validate_key(key)?;
        self.purge_if_expired(key);

        if let Some(entry) = self.entries.get_mut(key) {
            let items = match &mut entry.value {
                CachedValue::List(items) => items,
                other => {
                    return Err(CacheError::WrongType {
                        key: key.to_string(),
                        found: other.type_name(),
                    })
                }
            };
            let new_size = items.iter().map(String::len).sum::<usize>() + value.len();
            Self::validate_size(new_size)?;
            items.push(value);
            let len = items.len();
            self.lru.touch(key);
            return Ok(len);
        }

        Self::validate_size(value.len())?;
        self.reserve_slot(key)?;
        let entry = CacheEntry::new(CachedValue::List(vec![value]), None);
        self.entries.insert(key.to_string(), entry);
        self.lru.touch(key);
        Ok(1)
    }

    // == Replace List ==
    /// Replaces the list under `key` with `values` and sets its TTL in one
    /// step. An empty `values` leaves the key absent. Returns the list length.
    pub fn replace_list(&mut self, key: &str, values: Vec<String>, ttl: Duration) -> Result<usize> {
        Self::validate_key(key)?;
        Self::validate_size(values.iter().map(String::len).sum())?;

        self.purge_if_expired(key);
        if values.is_empty() {
            self.delete(key);
            return Ok(0);
        }
        self.reserve_slot(key)?;

        let len = values.len();
        let entry = CacheEntry::new(CachedValue::List(values), Some(ttl));
        self.entries.insert(key.to_string(), entry);
        self.lru.touch(key);
        Ok(len)
    }

    // == List Range ==
    /// Returns every element of the list under `key`; empty when absent.
    pub fn list_range(&mut self, key: &str) -> Result<Vec<String>> {
        self.purge_if_expired(key);

        let items = match self.entries.get(key) {
            Some(CacheEntry {
                value: CachedValue::List(items),
                ..
            }) => items.clone(),
            Some(entry) => {
                return Err(CacheError::WrongType {
                    key: key.to_string(),
                    found: entry.value.type_name(),
                })
            }
            None => {
                self.stats.record_miss();
                return Ok(Vec::new());
            }
        };

        self.stats.record_hit();
        self.lru.touch(key);
        Ok(items)
    }

    // == Expire ==
    /// Sets the TTL of an existing key. Returns false when the key is absent.
    pub fn expire(&mut self, key: &str, ttl: Duration) -> bool {
        self.purge_if_expired(key);
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.expire_in(ttl);
                true
            }
            None => false,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` holds a live (unexpired) entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }
}
