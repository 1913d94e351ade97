//! Background task that purges expired email verification tokens.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

/// Start the token sweeper.
///
/// Every `interval_secs` it deletes verification tokens whose expiry has
/// passed. Stops when `shutdown` fires.
pub fn start_token_sweeper(
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval = interval_secs, "🧹 Token sweeper started");

        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sweep_expired_tokens(&repos).await {
                        warn!(error = %e, "Token sweep failed");
                    }
                }
                _ = shutdown.wait() => {
                    info!("🧹 Token sweeper shutting down");
                    break;
                }
            }
        }

        info!("🧹 Token sweeper stopped");
    })
}

/// Delete every expired token once. Returns the number removed.
pub async fn sweep_expired_tokens(repos: &Arc<dyn RepositoryProvider>) -> DomainResult<u64> {
    let removed = repos.verification_tokens().delete_expired(Utc::now()).await?;
    if removed > 0 {
        info!(count = removed, "Purged expired verification tokens");
    } else {
        debug!("No expired verification tokens");
    }
    Ok(removed)
}
