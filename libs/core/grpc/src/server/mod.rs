//! gRPC server helpers: configuration, health registration and startup logs.
//!
//! ```ignore
//! use grpc_client::server::{GrpcServer, ServerConfig, create_health_service};
//! use rpc::v1::todo_service_server::{TodoServiceServer, SERVICE_NAME};
//! use tonic::transport::Server;
//!
//! let config = ServerConfig::from_env()?;
//! let (mut health_reporter, health_service) = create_health_service();
//! GrpcServer::setup_health(&mut health_reporter, SERVICE_NAME).await;
//!
//! Server::builder()
//!     .timeout(config.request_timeout)
//!     .add_service(health_service)
//!     .add_service(TodoServiceServer::new(my_impl))
//!     .serve(config.socket_addr()?)
//!     .await?;
//! ```

mod builder;
mod config;

pub use builder::{GrpcServer, create_health_service};
pub use config::ServerConfig;
