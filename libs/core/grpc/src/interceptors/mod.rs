pub use tonic::service::Interceptor;

pub mod tracing;

pub use tracing::TracingInterceptor;
