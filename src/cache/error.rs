//! Cache backend failures.

use thiserror::Error;

/// Errors raised by a cache backend.
///
/// The coordinator never propagates these to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("key exceeds maximum length of {max} bytes")]
    KeyTooLong { max: usize },

    #[error("value exceeds maximum size of {max} bytes")]
    ValueTooLarge { max: usize },

    #[error("key '{key}' holds a {found} value")]
    WrongType { key: String, found: &'static str },

    #[error("cache is full and eviction failed")]
    CacheFull,

    #[error("backend failure: {0}")]
    Backend(String),
}
