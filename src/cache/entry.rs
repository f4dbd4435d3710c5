//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.
//! An entry holds either a single string or a list of strings.

use std::time::{Duration, Instant};

// == Cached Value ==
/// The payload stored under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    Text(String),
    List(Vec<String>),
}

impl CachedValue {
    /// Approximate payload size in bytes.
    pub fn size(&self) -> usize {
        match self {
            CachedValue::Text(s) => s.len(),
            CachedValue::List(items) => items.iter().map(String::len).sum(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CachedValue::Text(_) => "string",
            CachedValue::List(_) => "list",
        }
    }
}

// == Cache Entry ==
/// A single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: CachedValue,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    pub fn new(value: CachedValue, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current instant reaches its expiry, so a
    /// zero TTL expires immediately.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Expire ==
    /// Replaces the expiry with `ttl` from now.
    pub fn expire_in(&mut self, ttl: Duration) {
        self.expires_at = Some(Instant::now() + ttl);
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
