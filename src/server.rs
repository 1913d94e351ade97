//! Server runtime for the Mix Factory API.
//!
//! [`ServerHandle`] owns the full lifecycle: database, migrations, admin
//! bootstrap, the token sweeper, the REST API and graceful shutdown.

use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::{
    start_token_sweeper, BookingService, DjProfileService, IdentityService, IdentitySettings,
    Mailer,
};
use crate::config::{AppConfig, LogFormat};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::{init_database, run_migrations, DatabaseConfig, SmtpMailer};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Upsert the configured admin account when a password is set (default: true).
    pub bootstrap_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            bootstrap_admin: true,
        }
    }
}

// ── Wiring ─────────────────────────────────────────────────────────

/// Build the services and router state on top of an open database.
pub fn build_state(
    db: DatabaseConnection,
    config: &AppConfig,
    mailer: Arc<dyn Mailer>,
) -> (AppState, Arc<dyn RepositoryProvider>) {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let jwt_config = JwtConfig::new(
        config.security.jwt_secret.clone(),
        config.security.jwt_expiration_hours,
    );
    let settings = IdentitySettings {
        mode: config.registration.mode,
        public_base_url: config.registration.public_base_url.clone(),
        token_ttl_hours: config.registration.token_expiration_hours,
        mail_timeout: Duration::from_secs(config.email.send_timeout_secs),
        bcrypt_cost: config.security.bcrypt_cost,
    };

    let state = AppState {
        identity: Arc::new(IdentityService::new(
            repos.clone(),
            mailer,
            jwt_config,
            settings,
        )),
        dj_profiles: Arc::new(DjProfileService::new(repos.clone())),
        bookings: Arc::new(BookingService::new(repos.clone())),
        db,
        started_at: Arc::new(Instant::now()),
    };

    (state, repos)
}

/// The global recorder can only be installed once per process, so a
/// restart within the same process reuses the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
                None
            }
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running API server.
///
/// ```rust,no_run
/// use mixfactory::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Address the listener actually bound (port 0 resolves here).
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
    sweeper_task: JoinHandle<()>,
}

impl ServerHandle {
    /// Validate config, open the database, wire the services and start
    /// serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.ensure_valid()?;

        info!(mode = ?app_cfg.registration.mode, "Starting Mix Factory API...");

        let prometheus = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&DatabaseConfig {
            url: app_cfg.database.url.clone(),
            max_connections: app_cfg.database.max_connections,
        })
        .await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            run_migrations(&db).await?;
        }

        // ── Services ───────────────────────────────────────────
        let mailer = SmtpMailer::new(app_cfg.email.clone());
        if !mailer.is_enabled() {
            warn!("SMTP relay not configured, verification mail will not be sent");
        }
        let (state, repos) = build_state(db.clone(), &app_cfg, Arc::new(mailer));

        if opts.bootstrap_admin {
            if let Some(password) = &app_cfg.admin.password {
                match state
                    .identity
                    .ensure_admin(&app_cfg.admin.email, &app_cfg.admin.name, password)
                    .await
                {
                    Ok(admin) => info!(email = %admin.email, "Admin account ready"),
                    Err(e) => error!(error = %e, "Failed to bootstrap admin account"),
                }
            }
        }

        // ── Background tasks ───────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let sweeper_task = start_token_sweeper(
            repos.clone(),
            shutdown_signal.clone(),
            app_cfg.registration.token_cleanup_interval_secs,
        );

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(state, prometheus);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Mix Factory API started.");

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
            sweeper_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting for it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let Self {
            db,
            shutdown,
            api_task,
            sweeper_task,
            ..
        } = self;

        let drained = shutdown
            .run_cleanup(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
                if let Err(e) = sweeper_task.await {
                    error!("Token sweeper task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            warn!("In-flight requests were cut off");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Mix Factory shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the logging section. `RUST_LOG` wins over the
/// configured level. Calling it twice is a no-op.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::connect_in_memory;
    use crate::infrastructure::RecordingMailer;

    #[tokio::test]
    async fn build_state_wires_services_against_one_database() {
        let db = connect_in_memory().await.unwrap();
        let config = AppConfig::default();
        let (state, repos) = build_state(db, &config, Arc::new(RecordingMailer::new()));

        let admin = state
            .identity
            .ensure_admin("root@example.com", "Root", "secret123")
            .await
            .unwrap();
        let stored = repos.users().find_by_email("root@example.com").await.unwrap();
        assert_eq!(stored.map(|u| u.id), Some(admin.id));
    }

    #[test]
    fn options_default_to_migrating_and_bootstrapping() {
        let opts = ServerOptions::default();
        assert!(opts.auto_migrate);
        assert!(opts.bootstrap_admin);
    }
}
