use core_config::{ConfigError, FromEnv, env_flag, env_parse_or};
use std::time::Duration;
use tonic::transport::Endpoint;

/// Client channel settings: connection setup, per-call deadline and
/// HTTP/2 keep-alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
  pub connect_timeout: Duration,
  /// Client-side deadline for each RPC
  pub request_timeout: Duration,
  /// `None` disables HTTP/2 PING frames
  pub keep_alive_interval: Option<Duration>,
  pub keep_alive_timeout: Duration,
  pub tcp_nodelay: bool,
}

impl Default for ChannelConfig {
  fn default() -> Self {
    Self {
      connect_timeout: Duration::from_secs(5),
      request_timeout: Duration::from_secs(5),
      keep_alive_interval: Some(Duration::from_secs(30)),
      keep_alive_timeout: Duration::from_secs(10),
      tcp_nodelay: true,
    }
  }
}

impl FromEnv for ChannelConfig {
  /// Reads:
  /// - `GRPC_CLIENT_CONNECT_TIMEOUT_SECS` (default: 5)
  /// - `GRPC_CLIENT_REQUEST_TIMEOUT_SECS` (default: 5)
  /// - `GRPC_CLIENT_KEEP_ALIVE` (default: true)
  fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    let connect = env_parse_or("GRPC_CLIENT_CONNECT_TIMEOUT_SECS", defaults.connect_timeout.as_secs())?;
    let request = env_parse_or("GRPC_CLIENT_REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;
    let keep_alive = env_flag("GRPC_CLIENT_KEEP_ALIVE", true)?;

    Ok(Self {
      connect_timeout: Duration::from_secs(connect),
      request_timeout: Duration::from_secs(request),
      keep_alive_interval: defaults.keep_alive_interval.filter(|_| keep_alive),
      ..defaults
    })
  }
}

impl ChannelConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout = timeout;
    self
  }

  /// ```ignore
  /// let config = ChannelConfig::new().with_request_timeout(Duration::from_secs(5));
  /// ```
  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  pub fn without_keep_alive(mut self) -> Self {
    self.keep_alive_interval = None;
    self
  }

  pub(crate) fn apply_to_endpoint(self, endpoint: Endpoint) -> Endpoint {
    let endpoint = endpoint
      .connect_timeout(self.connect_timeout)
      .timeout(self.request_timeout)
      .tcp_nodelay(self.tcp_nodelay);

    match self.keep_alive_interval {
      Some(interval) => endpoint
        .http2_keep_alive_interval(interval)
        .keep_alive_timeout(self.keep_alive_timeout)
        .keep_alive_while_idle(true),
      None => endpoint,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = ChannelConfig::default();
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert!(config.keep_alive_interval.is_some());
    assert!(config.tcp_nodelay);
  }

  #[test]
  fn test_builder_pattern() {
    let config = ChannelConfig::new()
      .with_connect_timeout(Duration::from_secs(10))
      .with_request_timeout(Duration::from_secs(120))
      .without_keep_alive();

    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.request_timeout, Duration::from_secs(120));
    assert_eq!(config.keep_alive_interval, None);
  }

  #[test]
  fn test_from_env() {
    temp_env::with_vars(
      [
        ("GRPC_CLIENT_CONNECT_TIMEOUT_SECS", Some("2")),
        ("GRPC_CLIENT_REQUEST_TIMEOUT_SECS", None),
        ("GRPC_CLIENT_KEEP_ALIVE", Some("off")),
      ],
      || {
        let config = ChannelConfig::from_env().unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.keep_alive_interval, None);
      },
    );
  }

  #[test]
  fn test_from_env_rejects_garbage() {
    temp_env::with_var("GRPC_CLIENT_REQUEST_TIMEOUT_SECS", Some("soon"), || {
      assert!(ChannelConfig::from_env().is_err());
    });
  }
}
