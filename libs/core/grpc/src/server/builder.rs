//! gRPC Server utilities.

use super::config::ServerConfig;
use tonic_health::ServingStatus;
use tonic_health::server::HealthReporter;
use tracing::info;

/// Helper for creating gRPC servers with health checks.
///
/// # Example
///
/// ```ignore
/// use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
/// use rpc::v1::todo_service_server::{TodoServiceServer, SERVICE_NAME};
///
/// let config = ServerConfig::from_env()?;
/// let (mut health_reporter, health_service) = create_health_service();
/// GrpcServer::setup_health(&mut health_reporter, SERVICE_NAME).await;
/// GrpcServer::log_startup(&config, SERVICE_NAME);
/// ```
pub struct GrpcServer;

impl GrpcServer {
    pub fn log_startup(config: &ServerConfig, service_name: &str) {
        info!(
            addr = %config.addr_string(),
            service = service_name,
            compression = config.enable_compression,
            max_message_size = config.max_decoding_message_size,
            request_timeout = ?config.request_timeout,
            "gRPC server starting"
        );
    }

    /// Mark `service_name` and the empty service name (used by generic
    /// checks) as serving.
    pub async fn setup_health(health_reporter: &mut HealthReporter, service_name: &str) {
        Self::set_status(health_reporter, service_name, ServingStatus::Serving).await;
        info!(service = service_name, "Service marked as serving");
    }

    /// Flip both entries to NOT_SERVING, e.g. once shutdown has begun.
    pub async fn mark_not_serving(health_reporter: &mut HealthReporter, service_name: &str) {
        Self::set_status(health_reporter, service_name, ServingStatus::NotServing).await;
        info!(service = service_name, "Service marked as not serving");
    }

    async fn set_status(health_reporter: &mut HealthReporter, service_name: &str, status: ServingStatus) {
        health_reporter.set_service_status(service_name, status).await;
        health_reporter.set_service_status("", status).await;
    }
}

pub use tonic_health::server::health_reporter as create_health_service;
