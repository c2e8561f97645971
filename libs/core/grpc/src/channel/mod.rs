pub mod config;

pub use config::ChannelConfig;

use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Build a channel that connects on the first RPC.
///
/// The gateway uses this so it can start before the storage service is up;
/// calls made while the service is down fail with `Unavailable`.
pub fn create_channel_lazy_with_config(
    addr: impl Into<String>,
    config: ChannelConfig,
) -> GrpcResult<Channel> {
    let addr = addr.into();
    let endpoint = endpoint(&addr, config)?;

    tracing::debug!(
        target: "grpc_client",
        addr = %addr,
        "Creating lazy gRPC channel (connects on first request)"
    );

    Ok(endpoint.connect_lazy())
}

fn endpoint(addr: &str, config: ChannelConfig) -> GrpcResult<Endpoint> {
    let endpoint = Endpoint::from_shared(addr.to_string()).map_err(|e| {
        tracing::error!(target: "grpc_client", addr = %addr, error = ?e, "Invalid URI");
        GrpcError::InvalidUri(e)
    })?;

    Ok(config.apply_to_endpoint(endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lazy_channel_does_not_connect() {
        // Nothing listens here; a lazy channel must still be created.
        let result = create_channel_lazy_with_config("http://127.0.0.1:1", ChannelConfig::default());
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_lazy_channel_rejects_invalid_uri() {
        let result = create_channel_lazy_with_config("not a valid uri", ChannelConfig::default());
        assert!(matches!(result.unwrap_err(), GrpcError::InvalidUri(_)));
    }
}
