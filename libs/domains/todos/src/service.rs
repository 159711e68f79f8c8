use std::sync::Arc;
use tracing::instrument;

use crate::error::{TodoError, TodoResult};
use crate::models::{CreateTodo, Todo, UpdateTodo};
use crate::repository::TodoRepository;

/// The only API version this service answers to
pub const API_VERSION: &str = "v1";

/// Todo business rules on top of a [`TodoRepository`]
#[derive(Clone)]
pub struct TodoService<R: TodoRepository> {
    repository: Arc<R>,
    api_version: &'static str,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_api_version(repository, API_VERSION)
    }

    pub fn with_api_version(repository: R, api_version: &'static str) -> Self {
        Self {
            repository: Arc::new(repository),
            api_version,
        }
    }

    pub fn api_version(&self) -> &'static str {
        self.api_version
    }

    /// Reject any request whose `api` is not exactly the served version.
    ///
    /// Must run before anything touches the store.
    pub fn check_api(&self, requested: &str) -> TodoResult<()> {
        if requested == self.api_version {
            return Ok(());
        }

        tracing::warn!(requested, supported = self.api_version, "Rejected API version");
        Err(TodoError::UnsupportedVersion {
            requested: requested.to_string(),
            supported: self.api_version,
        })
    }

    #[instrument(skip(self, input), fields(todo_title = %input.title))]
    pub async fn create_todo(&self, input: CreateTodo) -> TodoResult<i64> {
        self.repository.insert(input).await
    }

    #[instrument(skip(self), fields(todo_id = %id))]
    pub async fn get_todo(&self, id: i64) -> TodoResult<Todo> {
        let mut rows = self.repository.find_by_id(id).await?;

        match rows.len() {
            0 => Err(TodoError::NotFound(id)),
            1 => Ok(rows.remove(0)),
            count => {
                tracing::error!(todo_id = id, count, "Duplicate todo rows");
                Err(TodoError::Duplicate(id))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn list_todos(&self) -> TodoResult<Vec<Todo>> {
        self.repository.find_all().await
    }

    /// Returns the number of rows updated, always 1 on success
    #[instrument(skip(self, input), fields(todo_id = %id))]
    pub async fn update_todo(&self, id: i64, input: UpdateTodo) -> TodoResult<u64> {
        match self.repository.update(id, input).await? {
            0 => Err(TodoError::NotFound(id)),
            updated => Ok(updated),
        }
    }

    /// Returns the number of rows deleted, always 1 on success
    #[instrument(skip(self), fields(todo_id = %id))]
    pub async fn delete_todo(&self, id: i64) -> TodoResult<u64> {
        match self.repository.delete(id).await? {
            0 => Err(TodoError::NotFound(id)),
            deleted => Ok(deleted),
        }
    }
}
