//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let db_start = Instant::now();
    let database = match state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
    {
        Ok(_) => ComponentHealth {
            status: "ok".to_string(),
            latency_ms: Some(db_start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            }
        }
    };

    let healthy = database.status == "ok";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
        }),
    )
}
