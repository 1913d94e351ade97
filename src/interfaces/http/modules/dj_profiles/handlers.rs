//! DJ profile API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateDjProfileRequest, DjListingDto, DjListingParams, DjProfileDto, UpdateDjProfileRequest};
use crate::application::Action;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::interfaces::http::error::{ApiError, ApiResult};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/dj/profile",
    tag = "DJ Profiles",
    security(("bearer_auth" = [])),
    request_body = CreateDjProfileRequest,
    responses(
        (status = 201, description = "Profile created (status PENDING)", body = ApiResponse<DjProfileDto>),
        (status = 400, description = "Invalid numeric field"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Caller already has a profile")
    )
)]
pub async fn create_profile(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(request): ValidatedJson<CreateDjProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DjProfileDto>>), ApiError> {
    let owner = caller.authorize(Action::ManageOwnProfile)?;
    let profile = state
        .dj_profiles
        .create_profile(owner, request.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(profile.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/dj/profile",
    tag = "DJ Profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's own profile", body = ApiResponse<DjProfileDto>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Caller has no profile")
    )
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<DjProfileDto> {
    let owner = caller.authorize(Action::ManageOwnProfile)?;
    let profile = state.dj_profiles.get_own(owner).await?;
    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/dj/profile",
    tag = "DJ Profiles",
    security(("bearer_auth" = [])),
    request_body = UpdateDjProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<DjProfileDto>),
        (status = 400, description = "Invalid numeric field"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Caller has no profile")
    )
)]
pub async fn update_own_profile(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(request): ValidatedJson<UpdateDjProfileRequest>,
) -> ApiResult<DjProfileDto> {
    let owner = caller.authorize(Action::ManageOwnProfile)?;
    let profile = state
        .dj_profiles
        .update_profile(owner, request.into())
        .await?;
    Ok(Json(ApiResponse::success(profile.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/dj/profile/{id}",
    tag = "DJ Profiles",
    params(("id" = String, Path, description = "DJ profile ID")),
    responses(
        (status = 200, description = "Verified DJ profile", body = ApiResponse<DjListingDto>),
        (status = 404, description = "No verified profile with this ID")
    )
)]
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DjListingDto> {
    let listing = state.dj_profiles.get_public(&id).await?;
    Ok(Json(ApiResponse::success(listing.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/dj/listing",
    tag = "DJ Profiles",
    params(DjListingParams),
    responses(
        (status = 200, description = "Verified DJs, best rated first", body = ApiResponse<PaginatedResponse<DjListingDto>>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(params): Query<DjListingParams>,
) -> ApiResult<PaginatedResponse<DjListingDto>> {
    let page = state.dj_profiles.list_public(params.into()).await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        DjListingDto::from,
    ))))
}
