//! Request ID middleware
//!
//! Reuses an incoming `X-Request-Id` or generates a UUID v4, runs the rest of
//! the stack inside a `request` span carrying it, and echoes it back.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    // user_id is filled in by the auth middleware once the caller is known
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        user_id = tracing::field::Empty,
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Request ID stored in request extensions
#[derive(Clone, Debug)]
pub struct RequestId(pub String);
