//! Todo domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned when a create request does not carry one.
pub const DEFAULT_STATUS: &str = "pending";

/// A persisted work item. The backing store is its source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub priority: i64,
}

/// Fields of a todo that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub content: String,
    pub status: String,
    pub created_by: String,
    pub priority: i64,
}

impl NewTodo {
    pub fn new(content: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            status: DEFAULT_STATUS.to_string(),
            created_by: created_by.into(),
            priority: 0,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }
}

/// A partial update. `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub content: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i64>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.status.is_none() && self.priority.is_none()
    }

    /// Applies the changes onto `todo`, leaving timestamps alone.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(content) = &self.content {
            todo.content = content.clone();
        }
        if let Some(status) = &self.status {
            todo.status = status.clone();
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
    }
}
