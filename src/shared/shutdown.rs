//! Graceful shutdown coordination
//!
//! One [`ShutdownSignal`] is created at startup and cloned into the HTTP
//! server and every background task; OS signals (SIGTERM, SIGINT) trigger it.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{error, info, warn};

/// Shutdown signal that can be cloned and shared across tasks
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            info!("🛑 Shutdown signal triggered");
            let _ = self.sender.send(());
        }
    }

    /// Resolve once shutdown has been triggered (immediately if it already was).
    pub async fn wait(&self) {
        let mut rx = self.sender.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Listen for OS shutdown signals (SIGTERM, SIGINT)
pub async fn listen_for_shutdown_signals(shutdown: ShutdownSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    error!(error = %e, "Failed to install signal handlers");
                    return;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => info!("📡 Received SIGTERM"),
            _ = sigint.recv() => info!("📡 Received SIGINT (Ctrl+C)"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        info!("📡 Received Ctrl+C");
    }

    shutdown.trigger();
}

/// Graceful shutdown coordinator
pub struct ShutdownCoordinator {
    signal: ShutdownSignal,
    timeout: Duration,
}

impl ShutdownCoordinator {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            signal: ShutdownSignal::new(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    pub fn start_signal_listener(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.signal.clone()));
    }

    /// Run `cleanup` bounded by the configured timeout.
    /// Returns `false` when the timeout elapsed first.
    pub async fn run_cleanup<Fut>(&self, cleanup: Fut) -> bool
    where
        Fut: Future<Output = ()>,
    {
        info!(timeout_secs = self.timeout.as_secs(), "⏳ Starting graceful shutdown");
        match tokio::time::timeout(self.timeout, cleanup).await {
            Ok(()) => {
                info!("✅ Graceful shutdown completed");
                true
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Graceful shutdown timed out");
                false
            }
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_returns_after_trigger() {
        let signal = ShutdownSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.wait().await })
        };
        tokio::task::yield_now().await;
        signal.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter finished")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_after_trigger_is_immediate() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        assert!(signal.is_triggered());
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("already triggered");
    }

    #[tokio::test]
    async fn cleanup_timeout_is_reported() {
        let coordinator = ShutdownCoordinator::new(0);
        let finished = coordinator
            .run_cleanup(tokio::time::sleep(Duration::from_millis(50)))
            .await;
        assert!(!finished);
    }
}
