use tonic::{Request, Status};

/// Metadata key carrying the per-call correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client interceptor that stamps every outgoing call with a fresh
/// `x-request-id` so server logs can be correlated with the caller.
///
/// # Example
/// ```ignore
/// use grpc_client::interceptors::TracingInterceptor;
/// use rpc::v1::todo_service_client::TodoServiceClient;
///
/// let channel = create_channel("http://[::1]:50051").await?;
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
        if request.metadata().contains_key(REQUEST_ID_HEADER) {
            return Ok(request);
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        request.metadata_mut().insert(
            REQUEST_ID_HEADER,
            request_id
                .parse()
                .map_err(|_| Status::internal("Failed to create request ID"))?,
        );

        tracing::debug!(target: "grpc_client", request_id = %request_id, "Outgoing gRPC request");

        Ok(request)
    }
}

/// Read the caller's `x-request-id`, if it sent a printable one.
pub fn request_id<T>(request: &Request<T>) -> Option<&str> {
    request
        .metadata()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}
