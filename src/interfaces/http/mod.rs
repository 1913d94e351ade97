//! HTTP REST API interfaces
//!
//! - `middleware`: bearer authentication and the `Caller` extractor
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod error;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use router::{create_api_router, ApiDoc};
pub use state::AppState;
