//! Request DTOs for the todo service API
//!
//! Defines the structure of incoming HTTP request bodies and their validation.

use serde::Deserialize;

use crate::models::{NewTodo, TodoChanges, DEFAULT_STATUS};

/// Request body for POST /todos
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: i64,
}

impl CreateTodoRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.content.trim().is_empty() {
            return Some("content is required".to_string());
        }
        if self.created_by.trim().is_empty() {
            return Some("createdBy is required".to_string());
        }
        None
    }

    pub fn into_new_todo(self) -> NewTodo {
        let status = self
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());
        NewTodo::new(self.content, self.created_by)
            .with_status(status)
            .with_priority(self.priority)
    }
}

/// Request body for PUT /todos/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl UpdateTodoRequest {
    pub fn validate(&self) -> Option<String> {
        if self.content.is_none() && self.status.is_none() && self.priority.is_none() {
            return Some("at least one of content, status or priority is required".to_string());
        }
        if matches!(&self.content, Some(c) if c.trim().is_empty()) {
            return Some("content cannot be empty".to_string());
        }
        None
    }

    pub fn into_changes(self) -> TodoChanges {
        TodoChanges {
            content: self.content,
            status: self.status,
            priority: self.priority,
        }
    }
}
