//! Shared router state
//!
//! One `AppState` is built at startup; each module extracts the slice it
//! needs through `FromRef`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use super::middleware::AuthState;
use super::modules::health::HealthState;
use crate::application::{BookingService, DjProfileService, IdentityService};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub dj_profiles: Arc<DjProfileService>,
    pub bookings: Arc<BookingService>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            identity: Arc::clone(&s.identity),
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}
