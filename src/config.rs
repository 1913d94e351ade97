//! Configuration module
//!
//! TOML file with one table per concern. Every field has a default, so a
//! missing file yields a runnable development setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Env var overriding the config file location
pub const CONFIG_ENV: &str = "MIXFACTORY_CONFIG";

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds allowed for in-flight work after a shutdown signal
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_shutdown_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://./mixfactory.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: i64,
    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiration_hours: default_jwt_expiration_hours(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_jwt_expiration_hours() -> i64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    crate::infrastructure::crypto::password::DEFAULT_COST
}

/// Bootstrap administrator upserted at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_email")]
    pub email: String,
    #[serde(default = "default_admin_name")]
    pub name: String,
    /// No bootstrap account is created when unset
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: default_admin_email(),
            name: default_admin_name(),
            password: None,
        }
    }
}

fn default_admin_email() -> String {
    "admin@mixfactory.local".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMode {
    /// Accounts are verified on creation; no mail is sent
    #[default]
    Development,
    /// Accounts must confirm their email address
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    #[serde(default)]
    pub mode: RegistrationMode,
    /// Origin used to build links in outgoing mail and redirects
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_token_expiration_hours")]
    pub token_expiration_hours: i64,
    #[serde(default = "default_token_cleanup_interval_secs")]
    pub token_cleanup_interval_secs: u64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            mode: RegistrationMode::default(),
            public_base_url: default_public_base_url(),
            token_expiration_hours: default_token_expiration_hours(),
            token_cleanup_interval_secs: default_token_cleanup_interval_secs(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_token_expiration_hours() -> i64 {
    24
}

fn default_token_cleanup_interval_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// STARTTLS when true, plaintext otherwise
    #[serde(default = "default_true")]
    pub smtp_tls: bool,
    #[serde(default)]
    pub smtp_username: Option<String>,
    #[serde(default)]
    pub smtp_password: Option<String>,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_tls: true,
            smtp_username: None,
            smtp_password: None,
            from_address: None,
            from_name: default_from_name(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        self.smtp_host.is_some() && self.from_address.is_some()
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_from_name() -> String {
    "Mix Factory".to_string()
}

fn default_send_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Problems that would make the server misbehave. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.server.port == 0 {
            problems.push("server.port must be non-zero".to_string());
        }
        if self.database.url.trim().is_empty() {
            problems.push("database.url is empty".to_string());
        }
        if self.database.max_connections == 0 {
            problems.push("database.max_connections must be at least 1".to_string());
        }
        if self.security.jwt_secret.len() < 16 {
            problems.push("security.jwt_secret must be at least 16 characters".to_string());
        }
        if self.security.jwt_expiration_hours <= 0 {
            problems.push("security.jwt_expiration_hours must be positive".to_string());
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            problems.push("security.bcrypt_cost must be within 4..=31".to_string());
        }
        if self.registration.token_expiration_hours <= 0 {
            problems.push("registration.token_expiration_hours must be positive".to_string());
        }
        if self.registration.token_cleanup_interval_secs == 0 {
            problems.push("registration.token_cleanup_interval_secs must be positive".to_string());
        }
        if !self.registration.public_base_url.starts_with("http://")
            && !self.registration.public_base_url.starts_with("https://")
        {
            problems.push("registration.public_base_url must be an http(s) URL".to_string());
        }
        if self.registration.mode == RegistrationMode::Production {
            if !self.email.is_configured() {
                problems.push(
                    "email.smtp_host and email.from_address are required in production mode"
                        .to_string(),
                );
            }
            if self.security.jwt_secret == DEFAULT_JWT_SECRET {
                problems.push("security.jwt_secret must be changed in production mode".to_string());
            }
        }
        if let Some(password) = &self.admin.password {
            if password.len() < 6 {
                problems.push("admin.password must be at least 6 characters".to_string());
            }
        }

        problems
    }

    /// `validate` as a single error
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}

/// `$MIXFACTORY_CONFIG`, else `~/.config/mixfactory/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mixfactory")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.registration.mode, RegistrationMode::Development);
        assert_eq!(config.registration.token_expiration_hours, 24);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [registration]
            mode = "production"
            public_base_url = "https://mixfactory.example"

            [email]
            smtp_host = "smtp.example"
            from_address = "noreply@mixfactory.example"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.registration.mode, RegistrationMode::Production);
        assert!(config.email.is_configured());
        assert_eq!(config.email.smtp_port, 587);
    }

    #[test]
    fn production_requires_mail_and_secret() {
        let mut config = AppConfig::default();
        config.registration.mode = RegistrationMode::Production;
        let problems = config.validate();
        assert!(problems.iter().any(|p| p.contains("smtp_host")));
        assert!(problems.iter().any(|p| p.contains("jwt_secret")));
    }

    #[test]
    fn development_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
    }

    #[test]
    fn unknown_mode_is_parse_error() {
        assert!(AppConfig::from_toml("[registration]\nmode = \"staging\"").is_err());
    }
}
