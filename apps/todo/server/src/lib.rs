//! Todo gRPC Service
//!
//! Serves `v1.TodoService` over PostgreSQL.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional Zstd compression)
//! TodoServiceImpl (service.rs)
//!   ↓ version gate, proto ↔ domain conversions
//! TodoService (domain layer)
//!   ↓ not-found / duplicate rules
//! PgTodoRepository (one pooled connection per call)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `server`: startup, health, graceful shutdown
//! - `service`: gRPC trait implementation
//! - `client`: the create → read → update → read-all → delete walkthrough
//!   used by the `todo-client` binary

pub mod client;
pub mod server;
pub mod service;

pub use server::run;
pub use service::TodoServiceImpl;
