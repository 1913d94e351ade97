//! Domain error → HTTP response mapping
//!
//! The only place status codes are chosen for domain outcomes. Handlers
//! return [`ApiResult`] and use `?` on service calls.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::common::ApiResponse;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) | DomainError::Expired(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Internal details never leave the process.
    pub fn message(&self) -> String {
        match &self.0 {
            DomainError::NotFound { entity, .. } => match *entity {
                "DjProfile" => "DJ profile not found".to_string(),
                "EmailVerificationToken" => "Invalid or expired verification token".to_string(),
                other => format!("{other} not found"),
            },
            DomainError::Validation(m)
            | DomainError::Conflict(m)
            | DomainError::Unauthorized(m)
            | DomainError::Forbidden(m)
            | DomainError::PreconditionFailed(m)
            | DomainError::Expired(m) => m.clone(),
            DomainError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let DomainError::Internal(detail) = &self.0 {
            error!(error = %detail, "Request failed");
        }
        let body = Json(ApiResponse::<()>::error(self.message()));
        (self.status(), body).into_response()
    }
}
