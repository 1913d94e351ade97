//! Admin API handlers
//!
//! Every handler here requires an ADMIN principal.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    AdminDjListParams, CleanupRequest, CleanupResponse, RatingDto, RoleFixRequest,
    UpdateDjStatusRequest, UpdateRatingRequest,
};
use crate::application::Action;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::interfaces::http::error::ApiResult;
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::modules::auth::UserDto;
use crate::interfaces::http::modules::dj_profiles::{DjListingDto, DjProfileDto};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/admin/dj",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(AdminDjListParams),
    responses(
        (status = 200, description = "Profiles in the requested status", body = ApiResponse<PaginatedResponse<DjListingDto>>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_djs(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<AdminDjListParams>,
) -> ApiResult<PaginatedResponse<DjListingDto>> {
    caller.authorize(Action::ReviewDjs)?;
    let page = state
        .dj_profiles
        .list_admin(params.status.as_deref(), params.page, params.limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        DjListingDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/dj/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "DJ profile ID")),
    responses(
        (status = 200, description = "Profile in any status", body = ApiResponse<DjListingDto>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_dj(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<DjListingDto> {
    caller.authorize(Action::ReviewDjs)?;
    let listing = state.dj_profiles.admin_get(&id).await?;
    Ok(Json(ApiResponse::success(listing.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/dj/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "DJ profile ID")),
    request_body = UpdateDjStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<DjProfileDto>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_dj_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateDjStatusRequest>,
) -> ApiResult<DjProfileDto> {
    caller.authorize(Action::ChangeDjStatus)?;
    let profile = state
        .dj_profiles
        .set_status(&id, &request.status, request.verification_notes)
        .await?;
    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/dj/{id}/rating",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "DJ profile ID")),
    responses(
        (status = 200, description = "Rating statistics", body = ApiResponse<RatingDto>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn get_dj_rating(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<RatingDto> {
    caller.authorize(Action::EditRatings)?;
    let stats = state.dj_profiles.get_rating(&id).await?;
    Ok(Json(ApiResponse::success(RatingDto::new(id, stats))))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/dj/{id}/rating",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "DJ profile ID")),
    request_body = UpdateRatingRequest,
    responses(
        (status = 200, description = "Rating statistics updated", body = ApiResponse<RatingDto>),
        (status = 400, description = "Rating outside 0..=5"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Profile not found")
    )
)]
pub async fn update_dj_rating(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRatingRequest>,
) -> ApiResult<RatingDto> {
    caller.authorize(Action::EditRatings)?;
    let stats = state.dj_profiles.set_rating(&id, request.into()).await?;
    Ok(Json(ApiResponse::success(RatingDto::new(id, stats))))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/users/role",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = RoleFixRequest,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid email or role"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "No account with this email")
    )
)]
pub async fn fix_user_role(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(request): ValidatedJson<RoleFixRequest>,
) -> ApiResult<UserDto> {
    caller.authorize(Action::FixRoles)?;
    let user = state
        .identity
        .set_role_by_email(&request.email, &request.role)
        .await?;
    Ok(Json(ApiResponse::success(user.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CleanupRequest,
    responses(
        (status = 200, description = "Accounts removed", body = ApiResponse<CleanupResponse>),
        (status = 400, description = "No emails given"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn cleanup_users(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(request): ValidatedJson<CleanupRequest>,
) -> ApiResult<CleanupResponse> {
    caller.authorize(Action::Cleanup)?;
    let report = state.identity.cleanup(&request.emails).await?;
    Ok(Json(ApiResponse::success(report.into())))
}
