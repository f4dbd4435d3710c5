//! Cache Module
//!
//! Ephemeral key/value and list storage with TTL expiration, plus the key
//! scheme used for cached todos.

mod backend;
mod entry;
mod error;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, MemoryCache};
pub use entry::{CacheEntry, CachedValue};
pub use error::CacheError;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes (list values count all elements)
pub const MAX_VALUE_SIZE: usize = 8 * 1024 * 1024; // 8 MB

/// Fixed key of the bulk "all todos" list.
pub const TODO_LIST_KEY: &str = "todos";

/// Key of the single-item entry for todo `id`.
pub fn todo_key(id: i64) -> String {
    format!("todo:{}", id)
}
