//! Cache-consistency coordinator
//!
//! Orchestrates reads, writes and invalidations across the policy gateway,
//! the cache backend and the backing store, following cache-aside:
//!
//! - Single-item reads are gated by the policy decision on both the read and
//!   the populate side.
//! - The bulk list is always read from and rebuilt into the cache.
//! - Update and delete invalidate the single-item key only. The bulk list may
//!   stay stale for up to its TTL after a mutation.
//!
//! Backing store failures fail the operation. Cache failures never do: reads
//! fall back to the store and populate/invalidate failures are logged and
//! dropped. Policy failures and timeouts resolve to [`FALLBACK_DECISION`].
//!
//! No locking spans operations. A read racing an update on the same id can
//! repopulate the item key with the pre-update row; that entry lives until
//! the next invalidation or its TTL.

use std::sync::Arc;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::cache::{todo_key, CacheBackend, TODO_LIST_KEY};
use crate::config::CacheSettings;
use crate::error::{AppError, Result};
use crate::models::{NewTodo, Todo, TodoChanges};
use crate::policy::{PolicyDecision, PolicyGateway, FALLBACK_DECISION};
use crate::store::TodoRepository;

// == Todo Coordinator ==
/// Cache-aside front for the todo store.
///
/// Holds its collaborators as injected trait objects; clones of the same
/// `Arc`s can back several coordinators.
pub struct TodoCoordinator {
    store: Arc<dyn TodoRepository>,
    cache: Arc<dyn CacheBackend>,
    policy: Arc<dyn PolicyGateway>,
    settings: CacheSettings,
}

impl TodoCoordinator {
    // == Constructor ==
    /// Creates a coordinator over the given store, cache and policy gateway.
    pub fn new(
        store: Arc<dyn TodoRepository>,
        cache: Arc<dyn CacheBackend>,
        policy: Arc<dyn PolicyGateway>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            store,
            cache,
            policy,
            settings,
        }
    }

    /// TTLs and resolver timeout in effect.
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    // == Create ==
    /// Persists a new todo. Caches are read-populated, so nothing is cached here.
    pub async fn create(&self, new: NewTodo) -> Result<Todo> {
        let todo = self.store.insert(new, Utc::now()).await?;
        info!("Created todo {}", todo.id);
        Ok(todo)
    }

    // == Get ==
    /// Reads one todo, consulting the cache only when the policy allows it.
    pub async fn get(&self, id: i64, client_version: &str) -> Result<Todo> {
        let decision = self.resolve_policy(client_version).await;
        let key = todo_key(id);

        if decision.use_cache {
            if let Some(todo) = self.read_cached::<Todo>(&key).await {
                debug!("Cache hit for {}", key);
                return Ok(todo);
            }
            debug!("Cache miss for {}", key);
        }

        let todo = self.store.find(id).await?.ok_or(AppError::NotFound(id))?;

        if decision.use_cache {
            self.populate(&key, &todo).await;
        }
        Ok(todo)
    }

    // == List ==
    /// Reads every todo. Always cache-aside, independent of any policy.
    pub async fn list(&self) -> Result<Vec<Todo>> {
        if let Some(todos) = self.read_cached_list().await {
            debug!("Cache hit for {} ({} items)", TODO_LIST_KEY, todos.len());
            return Ok(todos);
        }

        let todos = self.store.find_all().await?;
        self.rebuild_list(&todos).await;
        Ok(todos)
    }

    // == Update ==
    /// Applies `changes`, then drops the single-item cache entry.
    pub async fn update(&self, id: i64, changes: TodoChanges) -> Result<Todo> {
        let updated = self.store.update(id, changes, Utc::now()).await?;
        self.invalidate(id).await;

        let todo = updated.ok_or(AppError::NotFound(id))?;
        info!("Updated todo {}", id);
        Ok(todo)
    }

    // == Delete ==
    /// Removes the row, then drops the single-item cache entry.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let removed = self.store.delete(id).await?;
        self.invalidate(id).await;

        if !removed {
            return Err(AppError::NotFound(id));
        }
        info!("Deleted todo {}", id);
        Ok(())
    }

    // == Policy ==
    /// Resolves the caching decision for `client_version`, bounded by the
    /// configured timeout. Errors and timeouts yield [`FALLBACK_DECISION`].
    async fn resolve_policy(&self, client_version: &str) -> PolicyDecision {
        let resolved =
            tokio::time::timeout(self.settings.policy_timeout, self.policy.resolve(client_version))
                .await;

        match resolved {
            Ok(Ok(decision)) => decision,
            Ok(Err(e)) => {
                warn!("{}; bypassing cache", e);
                FALLBACK_DECISION
            }
            Err(_) => {
                warn!(
                    "Policy resolve timed out after {:?}; bypassing cache",
                    self.settings.policy_timeout
                );
                FALLBACK_DECISION
            }
        }
    }

    // == Cache Reads ==
    /// Cached value under `key`. Backend errors and undecodable payloads
    /// both count as a miss.
    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Cache read for {} failed: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// The cached bulk list, or None on a miss. Elements that fail to decode
    /// are skipped.
    async fn read_cached_list(&self) -> Option<Vec<Todo>> {
        let raw = match self.cache.list_range(TODO_LIST_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cache read for {} failed: {}", TODO_LIST_KEY, e);
                return None;
            }
        };
        if raw.is_empty() {
            return None;
        }

        let todos = raw
            .iter()
            .filter_map(|item| match serde_json::from_str::<Todo>(item) {
                Ok(todo) => Some(todo),
                Err(e) => {
                    warn!("Skipping undecodable element of {}: {}", TODO_LIST_KEY, e);
                    None
                }
            })
            .collect();
        Some(todos)
    }

    // == Populate ==
    /// Writes `value` under `key` with the single-item TTL. Failures are
    /// logged and dropped.
    async fn populate<T: Serialize>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize {} for caching: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.cache.set(key, payload, self.settings.item_ttl).await {
            warn!("Cache populate for {} failed: {}", key, e);
        }
    }

    // == List Rebuild ==
    /// Replaces the bulk list with `todos` as one cache command. Concurrent
    /// rebuilds overwrite each other whole. An empty store leaves the key absent.
    async fn rebuild_list(&self, todos: &[Todo]) {
        let payloads: Vec<String> = todos
            .iter()
            .filter_map(|todo| match serde_json::to_string(todo) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!("Could not serialize todo {} for caching: {}", todo.id, e);
                    None
                }
            })
            .collect();

        match self
            .cache
            .replace_list(TODO_LIST_KEY, payloads, self.settings.list_ttl)
            .await
        {
            Ok(0) => {}
            Ok(len) => debug!("Cached {} todos under {}", len, TODO_LIST_KEY),
            Err(e) => warn!("Cache rebuild for {} failed: {}", TODO_LIST_KEY, e),
        }
    }

    // == Invalidate ==
    /// Drops the single-item entry for `id`. Failures are logged, never raised.
    async fn invalidate(&self, id: i64) {
        let key = todo_key(id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!("Cache invalidation for {} failed: {}", key, e);
        }
    }
}
