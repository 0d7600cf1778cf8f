use crate::{
    Error,
    handler::{Handler, HandlerResponse, InvocationEvent},
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{Instrument, error, info_span, warn};
use uuid::Uuid;

/// Wraps the raw request body into an invocation event, the way an HTTP
/// proxy integration would. Bodies that are not UTF-8 get the failure response.
pub async fn invoke(State(handler): State<Handler>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("invocation", request_id = %request_id);

    let raw = match String::from_utf8(body.to_vec()) {
        Ok(raw) => raw,
        Err(e) => {
            let err = Error::parse(format!("Request body is not valid UTF-8: {}", e));
            span.in_scope(|| error!(kind = err.kind(), "Error during inference: {}", err));
            return into_http(HandlerResponse::failure(&err));
        }
    };

    let response = handler
        .handle(InvocationEvent::raw(raw))
        .instrument(span)
        .await;

    into_http(response)
}

pub async fn preflight() -> Response {
    into_http(HandlerResponse::preflight())
}

pub fn into_http(response: HandlerResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut http = (status, response.body).into_response();

    for (name, value) in response.headers {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                http.headers_mut().insert(name, value);
            }
            _ => warn!("Dropping invalid response header"),
        }
    }

    http
}
