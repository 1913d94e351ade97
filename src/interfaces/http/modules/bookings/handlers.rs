//! Booking API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{BookingDto, BookingListParams, CreateBookingRequest};
use crate::application::Action;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::error::{ApiError, ApiResult};
use crate::interfaces::http::middleware::Caller;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking requested (status PENDING)", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid date, duration or contact"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "DJ not found"),
        (status = 412, description = "DJ is not verified")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    caller: Caller,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let requester = caller.authorize(Action::ManageOwnBookings)?;
    let booking = state
        .bookings
        .create_booking(requester, request.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(booking.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(BookingListParams),
    responses(
        (status = 200, description = "Caller's bookings, newest first", body = ApiResponse<Vec<BookingDto>>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<BookingListParams>,
) -> ApiResult<Vec<BookingDto>> {
    let requester = caller.authorize(Action::ManageOwnBookings)?;
    let bookings = state
        .bookings
        .list_bookings(requester, params.status.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}
