use tonic::{Request, Status};

pub const REQUEST_ID_KEY: &str = "x-request-id";

/// Stamps every outgoing call with an `x-request-id` for log correlation.
///
/// ```ignore
/// let client = TodoServiceClient::with_interceptor(channel, TracingInterceptor::new());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TracingInterceptor;

impl TracingInterceptor {
    pub fn new() -> Self {
        Self
    }
}

impl tonic::service::Interceptor for TracingInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        // Keep an id set upstream
        if request.metadata().contains_key(REQUEST_ID_KEY) {
            return Ok(request);
        }

        let request_id = uuid::Uuid::now_v7().to_string();
        request.metadata_mut().insert(
            REQUEST_ID_KEY,
            request_id
                .parse()
                .map_err(|_| Status::internal("Failed to create request ID"))?,
        );

        tracing::debug!(target: "grpc_client", request_id = %request_id, "Outgoing gRPC request");

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::metadata::MetadataValue;
    use tonic::service::Interceptor;

    #[test]
    fn test_tracing_interceptor_adds_request_id() {
        let mut interceptor = TracingInterceptor::new();
        let req = interceptor.call(Request::new(())).unwrap();
        let id = req.metadata().get(REQUEST_ID_KEY).unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_tracing_interceptor_keeps_existing_id() {
        let mut interceptor = TracingInterceptor::new();
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(REQUEST_ID_KEY, MetadataValue::from_static("abc"));

        let req = interceptor.call(request).unwrap();
        assert_eq!(req.metadata().get(REQUEST_ID_KEY).unwrap(), "abc");
    }
}
