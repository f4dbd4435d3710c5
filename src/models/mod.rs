//! Domain types and the request/response models of the HTTP API.

pub mod requests;
pub mod responses;
mod todo;

// Re-export commonly used types
pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use responses::{DeleteResponse, HealthResponse, StatsResponse};
pub use todo::{NewTodo, Todo, TodoChanges, DEFAULT_STATUS};
