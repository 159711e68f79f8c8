use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row};

use crate::{
    error::{TodoError, TodoResult},
    models::{CreateTodo, Todo, UpdateTodo},
    repository::TodoRepository,
};

const INSERT_TODO: &str =
    "INSERT INTO todo (title, description, created_at, updated_at) VALUES ($1, $2, $3, $4) RETURNING id";
const SELECT_TODO: &str = "SELECT id, title, description, created_at, updated_at FROM todo WHERE id = $1";
const SELECT_TODOS: &str = "SELECT id, title, description, created_at, updated_at FROM todo";
const UPDATE_TODO: &str = "UPDATE todo SET title = $1, description = $2, updated_at = $3 WHERE id = $4";
const DELETE_TODO: &str = "DELETE FROM todo WHERE id = $1";

/// [`TodoRepository`] over a shared PostgreSQL pool.
///
/// Each method checks out one connection for its own duration. The
/// [`PoolConnection`] guard hands it back to the pool when it goes out of
/// scope, so early returns and cancelled futures release it too.
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn connect(&self) -> TodoResult<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(TodoError::Connection)
    }
}

fn column<'r, T>(row: &'r PgRow, field: &'static str) -> TodoResult<T>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(field).map_err(|e| TodoError::Decode {
        field,
        reason: e.to_string(),
    })
}

fn decode_row(row: &PgRow) -> TodoResult<Todo> {
    Ok(Todo {
        id: column(row, "id")?,
        title: column(row, "title")?,
        description: column(row, "description")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
    })
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn insert(&self, input: CreateTodo) -> TodoResult<i64> {
        let mut conn = self.connect().await?;

        let id: Option<i64> = sqlx::query_scalar(INSERT_TODO)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.created_at)
            .bind(input.updated_at)
            .fetch_optional(&mut *conn)
            .await
            .map_err(TodoError::database("unable to insert into database"))?;

        let id = id.ok_or(TodoError::MissingId)?;
        tracing::info!(todo_id = id, "Created todo");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> TodoResult<Vec<Todo>> {
        let mut conn = self.connect().await?;

        let rows = sqlx::query(SELECT_TODO)
            .bind(id)
            .fetch_all(&mut *conn)
            .await
            .map_err(TodoError::database("unable to select from todo"))?;

        rows.iter().map(decode_row).collect()
    }

    async fn find_all(&self) -> TodoResult<Vec<Todo>> {
        let mut conn = self.connect().await?;

        let rows = sqlx::query(SELECT_TODOS)
            .fetch_all(&mut *conn)
            .await
            .map_err(TodoError::database("unable to select from todo"))?;

        rows.iter().map(decode_row).collect()
    }

    async fn update(&self, id: i64, input: UpdateTodo) -> TodoResult<u64> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(UPDATE_TODO)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.updated_at)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(TodoError::database("failed to update todo"))?;

        tracing::info!(todo_id = id, rows = result.rows_affected(), "Updated todo");
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> TodoResult<u64> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(DELETE_TODO)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(TodoError::database("failed to delete todo"))?;

        tracing::info!(todo_id = id, rows = result.rows_affected(), "Deleted todo");
        Ok(result.rows_affected())
    }
}
