pub mod config;

pub use config::ChannelConfig;

use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Connect a channel using [`ChannelConfig::default`].
///
/// ## Example
/// ```ignore
/// use grpc_client::create_channel;
/// use rpc::v1::todo_service_client::TodoServiceClient;
///
/// let channel = create_channel("http://[::1]:50051").await?;
/// let client = TodoServiceClient::new(channel);
/// ```
pub async fn create_channel(addr: impl Into<String>) -> GrpcResult<Channel> {
  create_channel_with_config(addr, ChannelConfig::default()).await
}

/// Connect a channel with custom timeouts and HTTP/2 settings.
///
/// The connection is established eagerly; an unreachable server fails here
/// with [`GrpcError::ConnectionFailed`].
pub async fn create_channel_with_config(
  addr: impl Into<String>,
  config: ChannelConfig,
) -> GrpcResult<Channel> {
  let addr_string = addr.into();

  let endpoint = Endpoint::from_shared(addr_string.clone()).map_err(|e| {
    tracing::error!(target: "grpc_client", addr = %addr_string, error = ?e, "Invalid URI");
    GrpcError::InvalidUri(e)
  })?;

  let endpoint = config.apply_to_endpoint(endpoint);

  tracing::debug!(target: "grpc_client", addr = %addr_string, "Creating gRPC channel");

  endpoint.connect().await.map_err(|e| {
    tracing::error!(
      target: "grpc_client",
      addr = %addr_string,
      error = ?e,
      "Failed to connect to gRPC service"
    );
    GrpcError::ConnectionFailed(e)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[tokio::test]
  async fn test_invalid_uri() {
    let result = create_channel("not a valid uri").await;
    assert!(matches!(result, Err(GrpcError::InvalidUri(_))));
  }

  #[tokio::test]
  async fn test_connection_refused() {
    let config = ChannelConfig::new().with_connect_timeout(Duration::from_millis(500));
    // Port 1 on loopback is never a gRPC server
    let result = create_channel_with_config("http://127.0.0.1:1", config).await;
    assert!(matches!(result, Err(GrpcError::ConnectionFailed(_))));
  }
}
