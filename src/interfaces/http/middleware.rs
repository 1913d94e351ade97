//! Bearer authentication middleware for Axum
//!
//! Requests without an `Authorization` header pass through anonymously; the
//! access policy decides later whether that is acceptable. A header that is
//! present but not a valid bearer token is rejected with 401 right here.
//!
//! Protected route groups add [`require_action`] as a route layer so the
//! policy runs before any body is extracted.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use crate::application::{authorize, Action, IdentityService, Principal};
use crate::domain::DomainError;

#[derive(Clone)]
pub struct AuthState {
    pub identity: Arc<IdentityService>,
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Decode `Authorization: Bearer <jwt>` into a [`Principal`] extension.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|h| h.to_str().map(String::from));

    match auth_header {
        None => next.run(request).await,
        Some(Err(_)) => unauthorized("Invalid authentication token"),
        Some(Ok(value)) => {
            let Some(token) = extract_token(&value) else {
                return unauthorized("Invalid authentication token");
            };
            match auth_state.identity.authenticate(token) {
                Ok(principal) => {
                    tracing::Span::current().record("user_id", principal.user_id.as_str());
                    request.extensions_mut().insert(principal);
                    next.run(request).await
                }
                Err(e) => ApiError(e).into_response(),
            }
        }
    }
}

/// Route-layer guard: reject with 401/403 unless the caller may perform
/// `action`. Runs after [`auth_middleware`] and before handler extractors.
pub async fn require_action(
    State(action): State<Action>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match authorize(request.extensions().get::<Principal>(), action) {
        Ok(_) => next.run(request).await,
        Err(e) => ApiError(e).into_response(),
    }
}

fn unauthorized(message: &str) -> Response {
    ApiError(DomainError::Unauthorized(message.to_string())).into_response()
}

/// The caller as seen by a handler: `None` when the request was anonymous.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Principal>);

impl Caller {
    pub fn authorize(&self, action: Action) -> Result<&Principal, ApiError> {
        authorize(self.0.as_ref(), action).map_err(ApiError::from)
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<Principal>().cloned()))
    }
}
