use chrono::{DateTime, Utc};

/// A stored todo record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    /// Assigned by the store on insert, positive
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo. Timestamps are kept exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of the mutable fields; `created_at` is never touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: String,
    pub description: String,
    pub updated_at: DateTime<Utc>,
}
