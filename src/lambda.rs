use crate::{
    Error, Result,
    handler::{Handler, HandlerResponse, InvocationEvent},
};
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{Instrument, info, info_span};

/// Set by the Lambda execution environment.
pub const RUNTIME_API_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

pub fn is_lambda_environment() -> bool {
    std::env::var_os(RUNTIME_API_ENV).is_some()
}

/// Serves invocations from the Lambda runtime API until the process exits.
pub async fn run(handler: Handler) -> Result<()> {
    info!("Starting Lambda runtime loop");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move { invoke(&handler, event).await }
    }))
    .await
    .map_err(|e| Error::internal(format!("Lambda runtime error: {}", e)))
}

/// The payload is taken as untyped JSON so that malformed events still get
/// the uniform failure response instead of a runtime deserialization error.
pub async fn invoke(
    handler: &Handler,
    event: LambdaEvent<Value>,
) -> std::result::Result<HandlerResponse, lambda_runtime::Error> {
    let LambdaEvent { payload, context } = event;
    let span = info_span!("invocation", request_id = %context.request_id);

    Ok(handler
        .handle(InvocationEvent::from_value(payload))
        .instrument(span)
        .await)
}
