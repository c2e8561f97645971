use crate::error::{GrpcError, GrpcResult};
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::net::SocketAddr;
use std::time::Duration;

/// Bind and transport settings of the gRPC server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Zstd in both directions
    pub enable_compression: bool,
    pub max_decoding_message_size: usize,
    pub max_encoding_message_size: usize,
    /// How long in-flight RPCs may run after a shutdown signal
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "[::1]".to_string(),
            port: 50051,
            enable_compression: true,
            max_decoding_message_size: 4 * 1024 * 1024,
            max_encoding_message_size: 4 * 1024 * 1024,
            shutdown_grace: Duration::from_secs(5),
        }
    }
}

impl FromEnv for ServerConfig {
    /// Reads `GRPC_HOST` ([::1]), `GRPC_PORT` (50051), `GRPC_COMPRESSION` (true),
    /// `GRPC_MAX_MESSAGE_SIZE` (4MB) and `GRPC_SHUTDOWN_GRACE_SECS` (5).
    fn from_env() -> Result<Self, ConfigError> {
        let max_message_size = env_parse("GRPC_MAX_MESSAGE_SIZE", "4194304")?;

        Ok(Self {
            host: env_or_default("GRPC_HOST", "[::1]"),
            port: env_parse("GRPC_PORT", "50051")?,
            enable_compression: env_parse("GRPC_COMPRESSION", "true")?,
            max_decoding_message_size: max_message_size,
            max_encoding_message_size: max_message_size,
            shutdown_grace: Duration::from_secs(env_parse("GRPC_SHUTDOWN_GRACE_SECS", "5")?),
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

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn socket_addr(&self) -> GrpcResult<SocketAddr> {
        self.addr_string()
            .parse()
            .map_err(|e: std::net::AddrParseError| GrpcError::InvalidAddress {
                addr: self.addr_string(),
                details: e.to_string(),
            })
    }

    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
