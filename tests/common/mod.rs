//! Shared fakes for integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use todo_cache::cache::{CacheBackend, CacheError, CacheStats, MemoryCache};
use todo_cache::models::{NewTodo, Todo, TodoChanges};
use todo_cache::policy::{PolicyDecision, PolicyGateway, StaticPolicy};
use todo_cache::store::{SqliteTodoStore, TodoRepository};
use todo_cache::{AppError, CacheSettings, Result, TodoCoordinator};

// == Counting Store ==
/// SQLite store that counts read calls.
pub struct CountingStore {
    inner: SqliteTodoStore,
    finds: AtomicUsize,
    find_alls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: SqliteTodoStore::memory().unwrap(),
            finds: AtomicUsize::new(0),
            find_alls: AtomicUsize::new(0),
        }
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn find_alls(&self) -> usize {
        self.find_alls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TodoRepository for CountingStore {
    async fn insert(&self, todo: NewTodo, now: DateTime<Utc>) -> Result<Todo> {
        self.inner.insert(todo, now).await
    }

    async fn find(&self, id: i64) -> Result<Option<Todo>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(id).await
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        self.find_alls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }

    async fn update(
        &self,
        id: i64,
        changes: TodoChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>> {
        self.inner.update(id, changes, now).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.inner.delete(id).await
    }
}

// == Failing Store ==
pub struct FailingStore;

fn store_down<T>() -> Result<T> {
    Err(AppError::StoreUnavailable("database is locked".to_string()))
}

#[async_trait]
impl TodoRepository for FailingStore {
    async fn insert(&self, _todo: NewTodo, _now: DateTime<Utc>) -> Result<Todo> {
        store_down()
    }

    async fn find(&self, _id: i64) -> Result<Option<Todo>> {
        store_down()
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        store_down()
    }

    async fn update(
        &self,
        _id: i64,
        _changes: TodoChanges,
        _now: DateTime<Utc>,
    ) -> Result<Option<Todo>> {
        store_down()
    }

    async fn delete(&self, _id: i64) -> Result<bool> {
        store_down()
    }
}

// == Failing Cache ==
/// Cache backend whose every call fails.
pub struct FailingCache;

fn cache_down<T>() -> std::result::Result<T, CacheError> {
    Err(CacheError::Backend("connection refused".to_string()))
}

#[async_trait]
impl CacheBackend for FailingCache {
    async fn get(&self, _key: &str) -> std::result::Result<Option<String>, CacheError> {
        cache_down()
    }

    async fn set(
        &self,
        _key: &str,
        _value: String,
        _ttl: Duration,
    ) -> std::result::Result<(), CacheError> {
        cache_down()
    }

    async fn delete(&self, _key: &str) -> std::result::Result<(), CacheError> {
        cache_down()
    }

    async fn append_list(&self, _key: &str, _value: String) -> std::result::Result<usize, CacheError> {
        cache_down()
    }

    async fn replace_list(
        &self,
        _key: &str,
        _values: Vec<String>,
        _ttl: Duration,
    ) -> std::result::Result<usize, CacheError> {
        cache_down()
    }

    async fn list_range(&self, _key: &str) -> std::result::Result<Vec<String>, CacheError> {
        cache_down()
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> std::result::Result<bool, CacheError> {
        cache_down()
    }

    async fn stats(&self) -> std::result::Result<CacheStats, CacheError> {
        cache_down()
    }
}

// == Policies ==
pub struct FailingPolicy;

#[async_trait]
impl PolicyGateway for FailingPolicy {
    async fn resolve(&self, _client_version: &str) -> Result<PolicyDecision> {
        Err(AppError::PolicyUnavailable("resolver unreachable".to_string()))
    }
}

/// Resolver that never answers.
pub struct HangingPolicy;

#[async_trait]
impl PolicyGateway for HangingPolicy {
    async fn resolve(&self, _client_version: &str) -> Result<PolicyDecision> {
        std::future::pending::<()>().await;
        Ok(PolicyDecision::new(true))
    }
}

// == Harness ==
pub struct Harness {
    pub store: Arc<CountingStore>,
    pub cache: MemoryCache,
    pub coordinator: TodoCoordinator,
}

pub fn harness_with(policy: Arc<dyn PolicyGateway>, settings: CacheSettings) -> Harness {
    let store = Arc::new(CountingStore::new());
    let cache = MemoryCache::new(1000);
    let coordinator = TodoCoordinator::new(
        store.clone(),
        Arc::new(cache.clone()),
        policy,
        settings,
    );
    Harness {
        store,
        cache,
        coordinator,
    }
}

pub fn harness(use_cache: bool) -> Harness {
    harness_with(Arc::new(StaticPolicy::new(use_cache)), CacheSettings::default())
}

pub fn new_todo(content: &str) -> NewTodo {
    NewTodo::new(content, "alice").with_priority(2)
}
