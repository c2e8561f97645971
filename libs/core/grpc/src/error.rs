use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors raised while building channels or starting the server
#[derive(Error, Debug)]
pub enum GrpcError {
    #[error("Invalid URI: {0}")]
    InvalidUri(#[source] tonic::transport::Error),

    #[error("Invalid address {addr}: {details}")]
    InvalidAddress { addr: String, details: String },
}
