//! Authentication API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};

use super::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserDto, VerifyEmailQuery,
};
use crate::application::{Action, RegisterInput};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::error::{ApiError, ApiResult};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Missing field, short password or bad email"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let outcome = state
        .identity
        .register(RegisterInput {
            email: request.email,
            password: request.password,
            name: request.name,
            role: request.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(outcome.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/verify-email",
    tag = "Authentication",
    params(VerifyEmailQuery),
    responses(
        (status = 303, description = "Verified; redirect to the confirmation page"),
        (status = 400, description = "Missing, unknown or expired token"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Redirect, ApiError> {
    let token = query.token.unwrap_or_default();

    match state.identity.verify_email(&token).await {
        Ok(verified) => Ok(Redirect::to(&verified.redirect_url)),
        Err(e) if e.is_not_found_for("EmailVerificationToken") => Err(ApiError(
            DomainError::validation("Invalid or expired verification token"),
        )),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let auth = state
        .identity
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(auth.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<UserDto> {
    let principal = caller.authorize(Action::ReadOwnAccount)?;
    let user = state.identity.me(principal).await?;
    Ok(Json(ApiResponse::success(user.into())))
}
