//! # gRPC helpers
//!
//! Shared plumbing for the todo gateway (client side) and the task storage
//! service (server side).
//!
//! - **Channels**: HTTP/2 tuned lazy `Channel` creation
//! - **Identity metadata**: the caller id travels in the `userid` key
//! - **Interceptors**: `x-request-id` stamping for log correlation
//! - **Conversions**: wire ids parsed into `Uuid`, malformed ones as `INVALID_ARGUMENT`
//! - **Server**: `GRPC_*` configuration, health reporting, startup logging
//!
//! ## Client
//! ```ignore
//! use grpc_client::{create_channel_lazy_with_config, ChannelConfig, TracingInterceptor};
//! use rpc::todo::todo_service_client::TodoServiceClient;
//!
//! let channel = create_channel_lazy_with_config("http://[::1]:50051", ChannelConfig::default())?;
//! let client = TodoServiceClient::with_interceptor(channel, TracingInterceptor::new());
//! ```
//!
//! ## Server side identity
//! ```ignore
//! let owner = grpc_client::metadata::user_id(&request)?;
//! ```

pub mod channel;
pub mod conversions;
pub mod error;
pub mod interceptors;
pub mod metadata;
pub mod server;

pub use channel::{ChannelConfig, create_channel_lazy_with_config};
pub use error::{GrpcError, GrpcResult};
pub use interceptors::TracingInterceptor;
pub use metadata::{USER_ID_KEY, insert_user_id, user_id};
