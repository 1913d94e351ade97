use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A business rule rejected an otherwise well-formed request
    /// (e.g. booking a DJ that is not verified).
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Expired: {0}")]
    Expired(String),

    /// Unexpected failure. The message is for logs, never for callers.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_not_found_for(&self, wanted: &str) -> bool {
        matches!(self, Self::NotFound { entity, .. } if *entity == wanted)
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Map a database error, turning unique-constraint violations into `Conflict`.
pub fn db_err_with_conflict(e: DbErr, conflict_msg: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(conflict_msg.to_string()),
        _ => DomainError::from(InfraError::Database(e)),
    }
}

pub fn db_err(e: DbErr) -> DomainError {
    DomainError::from(InfraError::Database(e))
}
