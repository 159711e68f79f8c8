//! Wire (`rpc::v1`) ↔ domain conversions.
//!
//! Request timestamps are validated on the way in, so a malformed value is an
//! `InvalidArgument` before anything reaches the store. `TIMESTAMPTZ` keeps
//! microseconds, so request timestamps with a sub-microsecond part are
//! rejected rather than truncated. Stored timestamps that cannot be expressed
//! on the wire surface as `Decode` errors on the way out.

use chrono::{DateTime, Utc};
use grpc_client::conversions::{datetime_to_timestamp, timestamp_to_datetime};
use prost_types::Timestamp;
use rpc::v1;

use crate::error::TodoError;
use crate::models::{CreateTodo, Todo, UpdateTodo};

const NANOS_PER_MICRO: i32 = 1_000;

fn request_time(field: &'static str, ts: Option<&Timestamp>) -> Result<DateTime<Utc>, TodoError> {
    let ts = ts.ok_or(TodoError::MissingField(field))?;
    let dt = timestamp_to_datetime(ts).map_err(|e| TodoError::InvalidTimestamp {
        field,
        reason: e.to_string(),
    })?;

    if ts.nanos % NANOS_PER_MICRO != 0 {
        return Err(TodoError::InvalidTimestamp {
            field,
            reason: format!("nanos {} is finer than microsecond precision", ts.nanos),
        });
    }

    Ok(dt)
}

fn response_time(field: &'static str, dt: DateTime<Utc>) -> Result<Timestamp, TodoError> {
    datetime_to_timestamp(dt).map_err(|e| TodoError::Decode {
        field,
        reason: e.to_string(),
    })
}

/// The wire `id` is ignored on create.
impl TryFrom<v1::Todo> for CreateTodo {
    type Error = TodoError;

    fn try_from(todo: v1::Todo) -> Result<Self, Self::Error> {
        let created_at = request_time("created_at", todo.created_at.as_ref())?;
        let updated_at = request_time("updated_at", todo.updated_at.as_ref())?;

        Ok(Self {
            title: todo.title,
            description: todo.description,
            created_at,
            updated_at,
        })
    }
}

/// `created_at` on the wire is ignored; only `updated_at` is validated.
impl TryFrom<v1::Todo> for UpdateTodo {
    type Error = TodoError;

    fn try_from(todo: v1::Todo) -> Result<Self, Self::Error> {
        Ok(Self {
            updated_at: request_time("updated_at", todo.updated_at.as_ref())?,
            title: todo.title,
            description: todo.description,
        })
    }
}

impl TryFrom<Todo> for v1::Todo {
    type Error = TodoError;

    fn try_from(todo: Todo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: todo.id,
            created_at: Some(response_time("created_at", todo.created_at)?),
            updated_at: Some(response_time("updated_at", todo.updated_at)?),
            title: todo.title,
            description: todo.description,
        })
    }
}
