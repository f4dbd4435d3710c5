//! API Module
//!
//! HTTP handlers and routing for the todo service REST API.
//!
//! # Endpoints
//! - `POST /todos` - Create a todo
//! - `GET /todos/:id` - Read a todo (policy-gated cache)
//! - `GET /todos/all` - List all todos (always cached)
//! - `PUT /todos/:id` - Update a todo
//! - `DELETE /todos/:id` - Delete a todo
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
