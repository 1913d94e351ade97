//! Mix Factory API server
//!
//! ```sh
//! # Run with default config (~/.config/mixfactory/config.toml)
//! mixfactory-service
//!
//! # Custom config path and port
//! mixfactory-service --config /etc/mixfactory/config.toml --port 9090
//!
//! # Validate config without starting
//! mixfactory-service --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use mixfactory::config::{AppConfig, CONFIG_ENV};
use mixfactory::server::{init_tracing, ServerHandle, ServerOptions};

/// Mix Factory: DJ marketplace backend.
#[derive(Parser, Debug)]
#[command(
    name = "mixfactory-service",
    version,
    about = "DJ marketplace API: accounts, DJ profiles, verification and bookings",
    long_about = "Mix Factory REST API server.\n\n\
                  Default config: ~/.config/mixfactory/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip the admin account bootstrap.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(mixfactory::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        let problems = config.validate();
        if !problems.is_empty() {
            println!("❌ Configuration is invalid: {}", config_path.display());
            for problem in problems {
                println!("   - {}", problem);
            }
            return ExitCode::FAILURE;
        }
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Mode        : {:?}", config.registration.mode);
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        bootstrap_admin: !cli.no_admin,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    ExitCode::SUCCESS
}
