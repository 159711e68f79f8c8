use thiserror::Error;
use tonic::{Code, Status};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("unsupported API version: server supports '{supported}' but asked for '{requested}'")]
    UnsupportedVersion {
        requested: String,
        supported: &'static str,
    },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} has invalid format: {reason}")]
    InvalidTimestamp { field: &'static str, reason: String },

    #[error("Todo with id = {0} not found")]
    NotFound(i64),

    #[error("found multiple Todo rows with id = {0}")]
    Duplicate(i64),

    #[error("failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{field} field has invalid format: {reason}")]
    Decode { field: &'static str, reason: String },

    /// `INSERT … RETURNING id` returned no row without raising an error.
    /// Defensive only: a `BIGSERIAL` insert that succeeds always yields an id.
    #[error("database did not return the generated id")]
    MissingId,

    #[error("affected row count {0} does not fit the response")]
    RowCountOverflow(u64),
}

pub type TodoResult<T> = Result<T, TodoError>;

impl TodoError {
    pub(crate) fn database(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| TodoError::Database { context, source }
    }

    /// The gRPC status code this error is reported with
    pub fn code(&self) -> Code {
        match self {
            TodoError::UnsupportedVersion { .. } => Code::Unimplemented,
            TodoError::MissingField(_) | TodoError::InvalidTimestamp { .. } => Code::InvalidArgument,
            TodoError::NotFound(_) => Code::NotFound,
            TodoError::Duplicate(_)
            | TodoError::Connection(_)
            | TodoError::Database { .. }
            | TodoError::Decode { .. }
            | TodoError::MissingId
            | TodoError::RowCountOverflow(_) => Code::Unknown,
        }
    }
}

impl From<TodoError> for Status {
    fn from(err: TodoError) -> Self {
        Status::new(err.code(), err.to_string())
    }
}
