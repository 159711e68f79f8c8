//! Server configuration loaded from environment variables.

use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse_or};
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{GrpcError, GrpcResult};

const DEFAULT_MAX_MESSAGE_SIZE: usize = 8 * 1024 * 1024;

/// Configuration for gRPC server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: [::1] for IPv6 localhost)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    pub max_decoding_message_size: usize,
    pub max_encoding_message_size: usize,
    /// Upper bound on a single call, independent of any client deadline (default: 30s)
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "[::1]".to_string(),
            port: 50051,
            enable_compression: true,
            max_decoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_encoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl FromEnv for ServerConfig {
    /// Reads:
    /// - `GRPC_HOST` (default: [::1])
    /// - `GRPC_PORT` (default: 50051)
    /// - `GRPC_COMPRESSION` (default: true)
    /// - `GRPC_MAX_MESSAGE_SIZE` (default: 8388608 / 8MB)
    /// - `GRPC_REQUEST_TIMEOUT_SECS` (default: 30)
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_message_size = env_parse_or("GRPC_MAX_MESSAGE_SIZE", DEFAULT_MAX_MESSAGE_SIZE)?;
        let timeout_secs = env_parse_or("GRPC_REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;

        if timeout_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "GRPC_REQUEST_TIMEOUT_SECS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            host: env_or_default("GRPC_HOST", &defaults.host),
            port: env_parse_or("GRPC_PORT", defaults.port)?,
            enable_compression: env_flag("GRPC_COMPRESSION", defaults.enable_compression)?,
            max_decoding_message_size: max_message_size,
            max_encoding_message_size: max_message_size,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_decoding_message_size = size;
        self.max_encoding_message_size = size;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> GrpcResult<SocketAddr> {
        self.addr_string()
            .parse()
            .map_err(|e| GrpcError::InvalidConfig(format!("bind address '{}': {}", self.addr_string(), e)))
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "GRPC_HOST",
        "GRPC_PORT",
        "GRPC_COMPRESSION",
        "GRPC_MAX_MESSAGE_SIZE",
        "GRPC_REQUEST_TIMEOUT_SECS",
    ];

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr_string(), "[::1]:50051");
        assert!(config.enable_compression);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.socket_addr().is_ok());
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.host, "[::1]");
            assert_eq!(config.port, 50051);
            assert_eq!(config.max_decoding_message_size, DEFAULT_MAX_MESSAGE_SIZE);
        });
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                ("GRPC_HOST", Some("0.0.0.0")),
                ("GRPC_PORT", Some("6000")),
                ("GRPC_COMPRESSION", Some("false")),
                ("GRPC_MAX_MESSAGE_SIZE", Some("1024")),
                ("GRPC_REQUEST_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:6000");
                assert!(!config.enable_compression);
                assert_eq!(config.max_encoding_message_size, 1024);
                assert_eq!(config.request_timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_port() {
        temp_env::with_var("GRPC_PORT", Some("fifty"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("GRPC_PORT"));
        });
    }

    #[test]
    fn test_from_env_rejects_zero_timeout() {
        temp_env::with_var("GRPC_REQUEST_TIMEOUT_SECS", Some("0"), || {
            assert!(ServerConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_bad_host_is_invalid_config() {
        let config = ServerConfig::new().with_host("not a host");
        assert!(matches!(config.socket_addr(), Err(GrpcError::InvalidConfig(_))));
    }
}
