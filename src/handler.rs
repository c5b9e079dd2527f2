use lambda_runtime::tracing::{debug, error, info, warn};
use lambda_runtime::{Diagnostic, Error, LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;

use crate::capabilities::Capability;
use crate::config::Config;
use crate::context::AppContext;
use crate::models::error::{HandlerError, ProcessingError};
use crate::models::gateway::{InboundEvent, OutboundResponse};

/// Runs one gateway request through `capability`.
///
/// Preflight requests are answered immediately. Everything else is parsed,
/// validated and processed; each failure kind maps to a fixed status code
/// and only validation and configuration messages reach the caller.
pub async fn dispatch<C: Capability>(
    capability: &C,
    ctx: &AppContext,
    event: InboundEvent,
) -> OutboundResponse {
    if event.is_preflight() {
        info!(capability = C::NAME, "Answering CORS preflight");
        return OutboundResponse::preflight(C::ALLOWED_METHODS);
    }

    match execute(capability, ctx, &event).await {
        Ok(body) => {
            info!(capability = C::NAME, status = 200, "Request processed");
            OutboundResponse::success(C::ALLOWED_METHODS, body)
        }
        Err(e) => {
            let status = e.status_code();
            if e.is_client_error() {
                warn!(capability = C::NAME, status, error = %e, "Rejected request");
            } else {
                error!(capability = C::NAME, status, error = %e, "Request failed");
            }
            OutboundResponse::error(C::ALLOWED_METHODS, status, &e.public_message())
        }
    }
}

async fn execute<C: Capability>(
    capability: &C,
    ctx: &AppContext,
    event: &InboundEvent,
) -> Result<String, HandlerError> {
    let body: Value = serde_json::from_str(event.body_or_empty_object())
        .map_err(|e| HandlerError::InvalidBody(format!("Invalid JSON body: {e}")))?;

    let request = capability.validate(&body)?;
    let response = capability.process(ctx, request).await?;

    serde_json::to_string(&response)
        .map_err(|e| HandlerError::Processing(ProcessingError::Serialization(e)))
}

/// Lambda event handler. Deserialises the proxy event and dispatches it.
/// Logs full event when `RUST_LOG=debug/trace`, only the method in production.
///
/// Always answers with a proxy response; a payload that is not a gateway
/// event becomes a 400 rather than a Lambda invocation error.
///
/// # Errors
///
/// Never returns `Err`; the `Diagnostic` type is required by `lambda_runtime`.
pub async fn function_handler<C: Capability>(
    capability: &C,
    ctx: &AppContext,
    event: LambdaEvent<Value>,
) -> Result<OutboundResponse, Diagnostic> {
    let (payload, _context) = event.into_parts();
    debug!(capability = C::NAME, payload = ?payload, "Received event");

    let inbound: InboundEvent = match serde_json::from_value(payload) {
        Ok(inbound) => inbound,
        Err(e) => {
            warn!(capability = C::NAME, error = %e, "Payload is not a gateway proxy event");
            return Ok(OutboundResponse::error(
                C::ALLOWED_METHODS,
                400,
                &format!("Malformed gateway event: {e}"),
            ));
        }
    };

    info!(capability = C::NAME, method = %inbound.http_method, "Invoking capability");

    Ok(dispatch(capability, ctx, inbound).await)
}

/// Serves `capability` on the Lambda runtime until shutdown.
///
/// # Errors
///
/// Returns an error if the runtime cannot start or loses its connection to
/// the Lambda API.
pub async fn run<C>(capability: C) -> Result<(), Error>
where
    C: Capability + 'static,
{
    let ctx = AppContext::from_env(Config::from_env()).await;
    let capability = Arc::new(capability);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let capability = Arc::clone(&capability);
        let ctx = ctx.clone();
        async move { function_handler(capability.as_ref(), &ctx, event).await }
    }))
    .await
}
