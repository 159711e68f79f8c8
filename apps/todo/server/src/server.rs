//! gRPC server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Tracing initialization
//! - Database connection
//! - Service creation
//! - gRPC server configuration, health checks and graceful shutdown

use std::future::Future;

use core_config::{Environment, FromEnv};
use database::common::RetryConfig;
use database::postgres::{PgPool, PostgresConfig, check_health_detailed};
use domain_todos::{PgTodoRepository, TodoRepository, TodoService};
use eyre::{Result, WrapErr, eyre};
use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
use rpc::v1::todo_service_server::{SERVICE_NAME, TodoServiceServer};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tracing::info;

use crate::service::TodoServiceImpl;

/// Run the gRPC server
///
/// 1. Sets up structured logging (JSON for prod, pretty for dev)
/// 2. Connects to the database with retry logic
/// 3. Creates the repository and service layers
/// 4. Serves until SIGINT or SIGTERM, then drains and closes the pool
///
/// # Errors
///
/// Returns an error if:
/// - Database or server configuration is invalid
/// - Database connection fails
/// - Server binding fails
/// - Server runtime encounters an error
pub async fn run() -> Result<()> {
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let db_config = PostgresConfig::from_env().wrap_err("Failed to load database configuration")?;
    let server_config = ServerConfig::from_env().wrap_err("Failed to load server configuration")?;
    let addr = server_config.socket_addr()?;

    info!("Connecting to database...");
    let pool = database::postgres::connect_from_config_with_retry(&db_config, Some(RetryConfig::default()))
        .await
        .wrap_err("Failed to connect to database")?;
    verify_database(&pool).await?;

    let service = TodoService::new(PgTodoRepository::new(pool.clone()));

    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;

    GrpcServer::log_startup(&server_config, SERVICE_NAME);
    serve(service, &server_config, listener, shutdown_signal()).await?;

    pool.close().await;
    info!("Todo server stopped");

    Ok(())
}

/// Fail startup unless one round trip to the database succeeds.
async fn verify_database(pool: &PgPool) -> Result<()> {
    let status = check_health_detailed(pool).await;
    if !status.healthy {
        return Err(eyre!(
            "Database health check failed after {}ms: {}",
            status.response_time_ms,
            status.message.unwrap_or_default()
        ));
    }

    info!(response_time_ms = status.response_time_ms, "Connected to database successfully");
    Ok(())
}

/// Serve `service` plus `grpc.health.v1.Health` on `listener` until
/// `shutdown` resolves.
///
/// Health flips to NOT_SERVING as soon as shutdown starts; in-flight calls
/// are allowed to finish.
pub async fn serve<R, F>(
    service: TodoService<R>,
    config: &ServerConfig,
    listener: TcpListener,
    shutdown: F,
) -> Result<()>
where
    R: TodoRepository + 'static,
    F: Future<Output = ()> + Send,
{
    let (mut health_reporter, health_service) = create_health_service();
    GrpcServer::setup_health(&mut health_reporter, SERVICE_NAME).await;

    let mut todo_service = TodoServiceServer::new(TodoServiceImpl::new(service))
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);
    if config.enable_compression {
        todo_service = todo_service
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    if let Ok(local) = listener.local_addr() {
        info!(addr = %local, "TodoService listening");
    }

    Server::builder()
        .timeout(config.request_timeout)
        .add_service(health_service)
        .add_service(todo_service)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            shutdown.await;
            info!("Shutdown signal received, draining in-flight calls");
            GrpcServer::mark_not_serving(&mut health_reporter, SERVICE_NAME).await;
        })
        .await
        .wrap_err("gRPC server failed")
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
