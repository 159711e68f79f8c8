//! Todos Domain
//!
//! Versioned CRUD over todo records stored in PostgreSQL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← API version gate, not-found / duplicate rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← One pooled connection per call
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Todo, CreateTodo, UpdateTodo
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todos::{PgTodoRepository, TodoService};
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgres://...").await?;
//!
//! let repository = PgTodoRepository::new(pool);
//! let service = TodoService::new(repository);
//! let todos = service.list_todos().await?;
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TodoError, TodoResult};
pub use models::{CreateTodo, Todo, UpdateTodo};
pub use postgres::PgTodoRepository;
pub use repository::TodoRepository;
pub use service::{API_VERSION, TodoService};
