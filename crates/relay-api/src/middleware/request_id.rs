//! Request ID middleware.
//!
//! Every request runs inside a span carrying its request ID, so the exchange
//! outcome logged deep in the handler can be tied back to the inbound call.

use axum::{
    extract::Request,
    http::{HeaderValue, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::callback::CallbackParams;

/// Header name for the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Keeps a caller-supplied `X-Request-ID` (hosting platforms usually set one)
/// or generates a UUID v4, and echoes it on the response.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let params = CallbackParams::from_query(req.uri().query());
    let mut response = async move {
        // Only presence is logged: the code is a credential.
        tracing::info!(
            has_code = params.code.is_some(),
            has_state = params.state.is_some(),
            "Inbound request"
        );
        next.run(req).await
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}
