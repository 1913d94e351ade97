//! End-to-end HTTP flows against an in-memory database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mixfactory::config::{AppConfig, RegistrationMode};
use mixfactory::infrastructure::database::connect_in_memory;
use mixfactory::infrastructure::RecordingMailer;
use mixfactory::{build_state, create_api_router, AppState};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin-secret";

struct TestApp {
    router: Router,
    state: AppState,
    mailer: Arc<RecordingMailer>,
}

async fn app_with(mode: RegistrationMode) -> TestApp {
    let db = connect_in_memory().await.unwrap();
    let mut config = AppConfig::default();
    config.security.jwt_secret = "integration-test-secret".into();
    config.security.bcrypt_cost = 4;
    config.registration.mode = mode;
    config.registration.public_base_url = "https://mixfactory.test".into();

    let mailer = Arc::new(RecordingMailer::new());
    let (state, _repos) = build_state(db, &config, mailer.clone());
    TestApp {
        router: create_api_router(state.clone(), None),
        state,
        mailer,
    }
}

async fn app() -> TestApp {
    app_with(RegistrationMode::Development).await
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.raw(method, uri, token, body).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn register(&self, email: &str, role: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "email": email,
                "password": "password1",
                "name": "Test Person",
                "role": role,
            })),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(&self) -> String {
        self.state
            .identity
            .ensure_admin(ADMIN_EMAIL, "Admin", ADMIN_PASSWORD)
            .await
            .unwrap();
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Registered DJ with a profile; returns (token, profile id).
    async fn dj_with_profile(&self, email: &str) -> (String, String) {
        let (status, _) = self.register(email, "DJ").await;
        assert_eq!(status, StatusCode::CREATED);
        let token = self.login(email, "password1").await;
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/dj/profile",
                Some(&token),
                Some(json!({
                    "bio": "Deep house all night",
                    "genres": ["House", "Techno"],
                    "hourlyRate": "75.50",
                    "city": "Berlin",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "profile create failed: {}", body);
        let id = body["data"]["id"].as_str().unwrap().to_string();
        (token, id)
    }
}

fn booking_body(dj_id: &str) -> Value {
    json!({
        "djId": dj_id,
        "eventDate": "2030-06-01",
        "eventTime": "20:00",
        "eventDuration": 3,
        "eventLocation": "Warehouse 9",
        "eventType": "Wedding",
        "contactEmail": "client@example.com",
    })
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = app().await;

    let (status, body) = app.register("dup@example.com", "USER").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["emailVerified"], true);
    assert_eq!(body["data"]["tokenIssued"], false);

    let (status, body) = app.register("dup@example.com", "USER").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_reports_missing_fields_together() {
    let app = app().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "a@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email, password, and name are required");
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = app().await;
    let (status, _) = app.send(Method::GET, "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/api/v1/auth/me", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.register("me@example.com", "USER").await;
    let token = app.login("me@example.com", "password1").await;
    let (status, body) = app
        .send(Method::GET, "/api/v1/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "me@example.com");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn booking_follows_the_verification_workflow() {
    let app = app().await;
    let (dj_token, dj_id) = app.dj_with_profile("dj@example.com").await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/dj/profile", Some(&dj_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["hourlyRate"], 75.5);
    assert_eq!(body["data"]["status"], "PENDING");

    app.register("client@example.com", "USER").await;
    let client = app.login("client@example.com", "password1").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/bookings",
            Some(&client),
            Some(booking_body(&dj_id)),
        )
        .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    let admin = app.admin_token().await;
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/v1/admin/dj/{}", dj_id),
            Some(&admin),
            Some(json!({ "status": "VERIFIED", "verificationNotes": "Checked" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "status update failed: {}", body);
    assert_eq!(body["data"]["status"], "VERIFIED");
    assert!(body["data"]["verifiedAt"].is_string());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/bookings",
            Some(&client),
            Some(booking_body(&dj_id)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "booking failed: {}", body);
    assert_eq!(body["data"]["status"], "PENDING");
    assert_eq!(body["data"]["quotedPrice"], 226.5);

    let (status, body) = app
        .send(Method::GET, "/api/v1/bookings", Some(&client), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = app
        .send(Method::GET, "/api/v1/dj/listing?genre=House", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["user"]["name"], "Test Person");
}

#[tokio::test]
async fn booking_an_unknown_dj_is_not_found() {
    let app = app().await;
    app.register("client@example.com", "USER").await;
    let client = app.login("client@example.com", "password1").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/bookings",
            Some(&client),
            Some(booking_body("missing")),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "DJ profile not found");
}

/// Every admin route, with bodies that would fail validation if the
/// handler ever ran.
fn admin_requests() -> Vec<(Method, &'static str, Option<Value>)> {
    vec![
        (Method::GET, "/api/v1/admin/dj", None),
        (Method::GET, "/api/v1/admin/dj/x", None),
        (Method::PUT, "/api/v1/admin/dj/x", None),
        (Method::PUT, "/api/v1/admin/dj/x", Some(json!({ "status": 7 }))),
        (Method::GET, "/api/v1/admin/dj/x/rating", None),
        (Method::PUT, "/api/v1/admin/dj/x/rating", None),
        (Method::PUT, "/api/v1/admin/users/role", Some(json!({}))),
        (Method::DELETE, "/api/v1/admin/users", Some(json!({ "emails": [] }))),
        (Method::DELETE, "/api/v1/admin/users", None),
    ]
}

#[tokio::test]
async fn admin_routes_reject_anonymous_callers() {
    let app = app().await;
    for (method, uri, body) in admin_requests() {
        let (status, response) = app.send(method.clone(), uri, None, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(response["success"], false);
    }
}

#[tokio::test]
async fn admin_routes_reject_non_admins() {
    let app = app().await;
    app.register("user@example.com", "USER").await;
    let user = app.login("user@example.com", "password1").await;
    let (dj, _) = app.dj_with_profile("dj@example.com").await;

    for token in [&user, &dj] {
        for (method, uri, body) in admin_requests() {
            let (status, response) = app.send(method.clone(), uri, Some(token), body).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
            assert_eq!(response["error"], "Admin access required");
        }
    }
}

#[tokio::test]
async fn member_routes_check_the_token_before_the_body() {
    let app = app().await;
    let requests = [
        (Method::POST, "/api/v1/bookings", Some(json!({ "djId": 5 }))),
        (Method::POST, "/api/v1/bookings", None),
        (Method::GET, "/api/v1/bookings", None),
        (Method::POST, "/api/v1/dj/profile", Some(json!({ "genres": "House" }))),
        (Method::PUT, "/api/v1/dj/profile", None),
        (Method::GET, "/api/v1/dj/profile/me", None),
        (Method::GET, "/api/v1/auth/me", None),
    ];
    for (method, uri, body) in requests {
        let (status, _) = app.send(method.clone(), uri, None, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }

    // Public reads stay open.
    let (status, _) = app
        .send(Method::GET, "/api/v1/dj/listing", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(Method::GET, "/api/v1/dj/profile/unknown", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_with_bad_body_gets_a_validation_error() {
    let app = app().await;
    let admin = app.admin_token().await;
    let (status, _) = app
        .send(Method::PUT, "/api/v1/admin/dj/x", Some(&admin), None)
        .await;
    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert_ne!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_cleanup_removes_accounts_and_profiles() {
    let app = app().await;
    let (_, dj_id) = app.dj_with_profile("gone@example.com").await;
    let admin = app.admin_token().await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/admin/dj/{}", dj_id),
            Some(&admin),
            Some(json!({ "status": "VERIFIED" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.register("client@example.com", "USER").await;
    let client = app.login("client@example.com", "password1").await;
    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/bookings",
            Some(&client),
            Some(booking_body(&dj_id)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            Method::DELETE,
            "/api/v1/admin/users",
            Some(&admin),
            Some(json!({ "emails": ["gone@example.com", "nobody@example.com"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"]["bookings"], 1);
    assert_eq!(body["data"]["deleted"]["djProfiles"], 1);
    assert_eq!(body["data"]["deleted"]["users"], 1);

    // The client's account survives; the booking against the removed DJ does not.
    let (status, body) = app
        .send(Method::GET, "/api/v1/bookings", Some(&client), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn production_registration_requires_email_verification() {
    let app = app_with(RegistrationMode::Production).await;

    let (status, body) = app.register("new@example.com", "USER").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["tokenIssued"], true);
    assert_eq!(body["data"]["emailSent"], true);
    assert_eq!(body["data"]["user"]["emailVerified"], false);

    let token = app.mailer.last_token().expect("verification mail recorded");

    let (status, body) = app
        .send(Method::GET, "/api/v1/auth/verify-email?token=bogus", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired verification token");

    let response = app
        .raw(
            Method::GET,
            &format!("/api/v1/auth/verify-email?token={}", token),
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://mixfactory.test/auth/email-verified?email=new%40example.com"
    );

    // Tokens are single use.
    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/v1/auth/verify-email?token={}", token),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_database_status() {
    let app = app().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_object());
}
