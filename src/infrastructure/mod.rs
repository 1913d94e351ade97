//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod mail;

pub use database::{init_database, run_migrations, DatabaseConfig};
pub use mail::{RecordingMailer, SmtpMailer};
