//! # Mix Factory
//!
//! Backend for a DJ marketplace: accounts with email verification, DJ
//! profiles that go through an admin verification workflow, and booking
//! requests against verified DJs.
//!
//! ## Architecture
//!
//! - **domain**: entities, status machines and repository traits
//! - **application**: use cases (identity, DJ profiles, bookings) and the access policy
//! - **infrastructure**: SeaORM persistence, crypto, SMTP mail
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process lifecycle and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

pub use interfaces::http::{create_api_router, ApiDoc, AppState};

pub use server::{build_state, init_tracing, ServerHandle, ServerOptions};
