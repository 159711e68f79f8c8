//! # gRPC helpers
//!
//! Shared plumbing for the todo service and its clients:
//!
//! - **Channels**: HTTP/2-tuned client channels ([`create_channel`],
//!   [`ChannelConfig`])
//! - **Server**: environment-driven [`server::ServerConfig`], health
//!   registration and startup logging
//! - **Conversions**: validated `google.protobuf.Timestamp` ↔ `chrono` mapping
//! - **Interceptors**: `x-request-id` propagation
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_client::{create_channel, TracingInterceptor};
//! use rpc::v1::todo_service_client::TodoServiceClient;
//!
//! let channel = create_channel("http://[::1]:50051").await?;
//! let client = TodoServiceClient::with_interceptor(channel, TracingInterceptor::new())
//!     .accept_compressed(tonic::codec::CompressionEncoding::Zstd)
//!     .send_compressed(tonic::codec::CompressionEncoding::Zstd);
//! ```

pub mod channel;
pub mod conversions;
pub mod error;
pub mod interceptors;
pub mod server;

pub use channel::{ChannelConfig, create_channel, create_channel_with_config};
pub use error::{GrpcError, GrpcResult};
pub use interceptors::{REQUEST_ID_HEADER, TracingInterceptor, request_id};
