//! Backing store: the durable source of truth for todos.

mod schema;
mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{NewTodo, Todo, TodoChanges};

pub use sqlite::SqliteTodoStore;

/// Durable todo persistence.
///
/// Errors are always `AppError::StoreUnavailable`; a missing row is reported
/// through `Option`/`bool`, never as an error.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persists `todo` with both timestamps set to `now` and returns it with
    /// its assigned id.
    async fn insert(&self, todo: NewTodo, now: DateTime<Utc>) -> Result<Todo>;

    /// The row with this id, if any.
    async fn find(&self, id: i64) -> Result<Option<Todo>>;

    /// All todos ordered by id.
    async fn find_all(&self) -> Result<Vec<Todo>>;

    /// Applies `changes` and refreshes `updatedAt` to the later of `now` and
    /// its previous value. Returns None when no row has this id.
    async fn update(&self, id: i64, changes: TodoChanges, now: DateTime<Utc>)
        -> Result<Option<Todo>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}
