//! SQLite-backed todo store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::schema::{SELECT_COLUMNS, TODO_SCHEMA};
use super::TodoRepository;
use crate::error::{AppError, Result};
use crate::models::{NewTodo, Todo, TodoChanges};

/// SQLite todo store. Clones share one connection.
#[derive(Clone)]
pub struct SqliteTodoStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTodoStore {
    /// Open a file-backed store (`:memory:` opens an in-memory one).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create an in-memory store (for testing).
    pub fn memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        enable_wal(&conn);
        conn.execute_batch(TODO_SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| AppError::StoreUnavailable("connection lock poisoned".to_string()))?;
            f(&mut *guard)
        })
        .await?
    }
}

/// Best-effort switch to WAL. Returns whether the connection ended up in
/// WAL mode; in-memory databases never do.
fn enable_wal(conn: &Connection) -> bool {
    match conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0)) {
        Ok(mode) if mode.eq_ignore_ascii_case("wal") => true,
        Ok(mode) => {
            debug!("journal_mode stays '{}'", mode);
            false
        }
        Err(e) => {
            debug!("Could not enable WAL: {}", e);
            false
        }
    }
}

/// Maps a row selected with `SELECT_COLUMNS`.
fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        content: row.get(1)?,
        status: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
        created_by: row.get(5)?,
        priority: row.get(6)?,
    })
}

fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Todo>> {
    let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_todo).optional()?)
}

#[async_trait]
impl TodoRepository for SqliteTodoStore {
    async fn insert(&self, todo: NewTodo, now: DateTime<Utc>) -> Result<Todo> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO todo_items (content, status, createdAt, updatedAt, createdBy, priority)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![todo.content, todo.status, now, now, todo.created_by, todo.priority],
            )?;
            let id = conn.last_insert_rowid();
            debug!("Inserted todo {}", id);
            Ok(Todo {
                id,
                content: todo.content,
                status: todo.status,
                created_at: now,
                updated_at: now,
                created_by: todo.created_by,
                priority: todo.priority,
            })
        })
        .await
    }

    async fn find(&self, id: i64) -> Result<Option<Todo>> {
        self.with_conn(move |conn| select_by_id(conn, id)).await
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        self.with_conn(|conn| {
            let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let todos = stmt
                .query_map([], row_to_todo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(todos)
        })
        .await
    }

    async fn update(
        &self,
        id: i64,
        changes: TodoChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let Some(mut todo) = select_by_id(&tx, id)? else {
                return Ok(None);
            };

            changes.apply_to(&mut todo);
            todo.updated_at = todo.updated_at.max(now);

            tx.execute(
                "UPDATE todo_items SET content = ?1, status = ?2, priority = ?3, updatedAt = ?4
                 WHERE id = ?5",
                params![todo.content, todo.status, todo.priority, todo.updated_at, id],
            )?;
            tx.commit()?;
            Ok(Some(todo))
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.with_conn(move |conn| {
            let removed = conn.execute("DELETE FROM todo_items WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }
}
