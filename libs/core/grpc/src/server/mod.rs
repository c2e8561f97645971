//! gRPC server helpers.
//!
//! ```ignore
//! use grpc_client::server::{GrpcServer, ServerConfig};
//! use rpc::todo::todo_service_server::{TodoServiceServer, SERVICE_NAME};
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = tonic_health::server::health_reporter();
//! GrpcServer::setup_health(&health_reporter, SERVICE_NAME).await;
//! GrpcServer::log_startup(&config, SERVICE_NAME);
//!
//! Server::builder()
//!     .add_service(health_service)
//!     .add_service(TodoServiceServer::new(service).send_compressed(CompressionEncoding::Zstd))
//!     .serve_with_shutdown(config.socket_addr()?, shutdown)
//!     .await?;
//! ```

mod builder;
mod config;

pub use builder::GrpcServer;
pub use config::ServerConfig;
