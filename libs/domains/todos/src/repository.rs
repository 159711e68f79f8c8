use async_trait::async_trait;

use crate::error::TodoResult;
use crate::models::{CreateTodo, Todo, UpdateTodo};

/// Data access for todos.
///
/// Every call is independent: implementations must not hold a connection
/// between calls, and must release whatever they acquired on every path,
/// including when the returned future is dropped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a row and return the id the store generated
    async fn insert(&self, input: CreateTodo) -> TodoResult<i64>;

    /// Every row with `id`; more than one means the table is corrupt
    async fn find_by_id(&self, id: i64) -> TodoResult<Vec<Todo>>;

    async fn find_all(&self) -> TodoResult<Vec<Todo>>;

    /// Rows affected
    async fn update(&self, id: i64, input: UpdateTodo) -> TodoResult<u64>;

    /// Rows affected
    async fn delete(&self, id: i64) -> TodoResult<u64>;
}
