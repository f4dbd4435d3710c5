//! Todo service with a policy-gated cache-aside layer
//!
//! Todos live in a durable store; an ephemeral TTL cache accelerates reads.
//! Whether a single-item read may use the cache is decided per call by a
//! remote policy resolver.

pub mod api;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod policy;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::{CacheSettings, Config};
pub use coordinator::TodoCoordinator;
pub use error::{AppError, Result};
pub use tasks::spawn_cleanup_task;
