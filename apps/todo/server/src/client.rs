//! Example client: one pass of create → read → update → read-all → delete
//! against a running server, logging every response.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use clap::Parser;
use core_config::FromEnv;
use eyre::{Result, WrapErr, eyre};
use grpc_client::conversions::datetime_to_timestamp;
use grpc_client::{ChannelConfig, TracingInterceptor, create_channel_with_config};
use rpc::v1::{
    self, CreateRequest, DeleteRequest, ReadAllRequest, ReadRequest, UpdateRequest,
    todo_service_client::TodoServiceClient,
};
use tonic::codec::CompressionEncoding;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::{IntoRequest, Request};
use tracing::info;

/// The API version this client speaks
pub const API_VERSION: &str = "v1";

#[derive(Debug, Parser)]
#[command(name = "todo-client", about = "Exercise every TodoService call once")]
pub struct Args {
    /// Server address
    #[arg(long, default_value = "http://[::1]:50051")]
    pub server: String,

    /// Deadline for each call, in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,
}

type Client = TodoServiceClient<InterceptedService<Channel, TracingInterceptor>>;

/// Connect with request ids, Zstd and a per-call deadline.
///
/// The remaining channel settings come from `GRPC_CLIENT_*`.
pub async fn connect(server: &str, timeout: Duration) -> Result<Client> {
    let config = ChannelConfig::from_env()
        .wrap_err("Failed to load channel configuration")?
        .with_request_timeout(timeout);
    let channel = create_channel_with_config(server, config)
        .await
        .wrap_err_with(|| format!("Failed to connect to {}", server))?;

    Ok(TodoServiceClient::with_interceptor(channel, TracingInterceptor::new())
        .send_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Zstd))
}

/// The store keeps microseconds and the server rejects anything finer
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn with_deadline<T>(message: T, timeout: Duration) -> Request<T> {
    let mut request = message.into_request();
    request.set_timeout(timeout);
    request
}

pub async fn run(args: Args) -> Result<()> {
    let timeout = Duration::from_secs(args.timeout_secs);
    let mut client = connect(&args.server, timeout).await?;

    let stamp = datetime_to_timestamp(now())?;
    let todo = v1::Todo {
        id: 0,
        title: "title (1)".to_string(),
        description: "description (1)".to_string(),
        created_at: Some(stamp),
        updated_at: Some(stamp),
    };

    let created = client
        .create(with_deadline(
            CreateRequest {
                api: API_VERSION.to_string(),
                todo: Some(todo),
            },
            timeout,
        ))
        .await
        .wrap_err("Create failed")?
        .into_inner();
    info!(api = %created.api, id = created.id, "Create result");
    let id = created.id;

    let read = client
        .read(with_deadline(
            ReadRequest {
                api: API_VERSION.to_string(),
                id,
            },
            timeout,
        ))
        .await
        .wrap_err("Read failed")?
        .into_inner();
    info!(api = %read.api, todo = ?read.todo, "Read result");

    let mut todo = read.todo.ok_or_else(|| eyre!("Read returned no todo for id {}", id))?;
    todo.description.push_str(" + updated");
    todo.updated_at = Some(datetime_to_timestamp(now())?);

    let updated = client
        .update(with_deadline(
            UpdateRequest {
                api: API_VERSION.to_string(),
                todo: Some(todo),
            },
            timeout,
        ))
        .await
        .wrap_err("Update failed")?
        .into_inner();
    info!(api = %updated.api, updated = updated.updated, "Update result");

    let all = client
        .read_all(with_deadline(
            ReadAllRequest {
                api: API_VERSION.to_string(),
            },
            timeout,
        ))
        .await
        .wrap_err("ReadAll failed")?
        .into_inner();
    info!(api = %all.api, count = all.todos.len(), todos = ?all.todos, "ReadAll result");

    let deleted = client
        .delete(with_deadline(
            DeleteRequest {
                api: API_VERSION.to_string(),
                id,
            },
            timeout,
        ))
        .await
        .wrap_err("Delete failed")?
        .into_inner();
    info!(api = %deleted.api, deleted = deleted.deleted, "Delete result");

    Ok(())
}
