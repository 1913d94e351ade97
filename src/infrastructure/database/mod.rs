pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./mixfactory.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./mixfactory.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Default::default()
        }
    }

    /// Private in-memory database. A single connection keeps every query on
    /// the same database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection pool
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!(url = %config.url, "Connecting to database");
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply pending schema migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Fresh migrated in-memory database
pub async fn connect_in_memory() -> Result<DatabaseConnection, DbErr> {
    let db = init_database(&DatabaseConfig::in_memory()).await?;
    run_migrations(&db).await?;
    Ok(db)
}
