//! API Router with Swagger UI

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse, PaginationMeta};
use super::middleware::{auth_middleware, require_action, AuthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{admin, auth, bookings, dj_profiles, health};
use super::state::AppState;
use crate::application::Action;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Auth
        auth::register,
        auth::verify_email,
        auth::login,
        auth::get_current_user,
        // DJ profiles
        dj_profiles::create_profile,
        dj_profiles::get_own_profile,
        dj_profiles::update_own_profile,
        dj_profiles::get_public_profile,
        dj_profiles::list_profiles,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        // Admin
        admin::list_djs,
        admin::get_dj,
        admin::update_dj_status,
        admin::get_dj_rating,
        admin::update_dj_rating,
        admin::fix_user_role,
        admin::cleanup_users,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginationMeta,
            PaginatedResponse<dj_profiles::DjListingDto>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserDto,
            dj_profiles::CreateDjProfileRequest,
            dj_profiles::UpdateDjProfileRequest,
            dj_profiles::DjProfileDto,
            dj_profiles::DjListingDto,
            dj_profiles::OwnerDto,
            bookings::CreateBookingRequest,
            bookings::BookingDto,
            admin::UpdateDjStatusRequest,
            admin::UpdateRatingRequest,
            admin::RatingDto,
            admin::RoleFixRequest,
            admin::CleanupRequest,
            admin::CleanupResponse,
            admin::DeletedCounts,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Registration, email verification, login"),
        (name = "DJ Profiles", description = "Own profile management and the public DJ directory"),
        (name = "Bookings", description = "Booking requests against verified DJs"),
        (name = "Admin", description = "DJ verification, ratings and account maintenance"),
    ),
    info(
        title = "Mix Factory API",
        version = "1.0.0",
        description = "DJ marketplace backend: profiles, verification workflow and bookings",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `metrics` is `None` when no Prometheus recorder is installed (tests).
pub fn create_api_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let auth_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route_layer(middleware::from_fn_with_state(Action::ReadOwnAccount, require_action))
        .route("/register", post(auth::register))
        .route("/verify-email", get(auth::verify_email))
        .route("/login", post(auth::login));

    let dj_routes = Router::new()
        .route(
            "/profile",
            get(dj_profiles::get_own_profile)
                .post(dj_profiles::create_profile)
                .put(dj_profiles::update_own_profile),
        )
        .route("/profile/me", get(dj_profiles::get_own_profile))
        .route_layer(middleware::from_fn_with_state(Action::ManageOwnProfile, require_action))
        .route("/profile/{id}", get(dj_profiles::get_public_profile))
        .route("/listing", get(dj_profiles::list_profiles));

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route_layer(middleware::from_fn_with_state(Action::ManageOwnBookings, require_action));

    // Every admin action requires the admin role.
    let admin_routes = Router::new()
        .route("/dj", get(admin::list_djs))
        .route("/dj/{id}", get(admin::get_dj).put(admin::update_dj_status))
        .route(
            "/dj/{id}/rating",
            get(admin::get_dj_rating).put(admin::update_dj_rating),
        )
        .route("/users/role", put(admin::fix_user_role))
        .route("/users", delete(admin::cleanup_users))
        .route_layer(middleware::from_fn_with_state(Action::ReviewDjs, require_action));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/dj", dj_routes)
        .nest("/bookings", booking_routes)
        .nest("/admin", admin_routes)
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(state.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check).with_state(state))
        .nest("/api/v1", api);

    if let Some(handle) = metrics {
        router = router.route(
            "/metrics",
            get(prometheus_metrics).with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
