//! Graceful shutdown on SIGTERM and SIGINT.
//!
//! ```ignore
//! let sig_down = SigDown::try_new()?;
//! let token = sig_down.cancellation_token();
//! axum::serve(listener, app)
//!     .with_graceful_shutdown(async move { token.cancelled().await })
//!     .await?;
//! ```

use tokio::signal::unix::SignalKind;
use tokio::signal::unix::signal;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Cancels a token when the process receives SIGTERM or SIGINT.
pub struct SigDown {
    task_tracker: TaskTracker,
    cancellation_token: CancellationToken,
}

impl SigDown {
    /// Registers the signal handlers.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn try_new() -> Result<Self, std::io::Error> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let inner = CancellationToken::new();
        let outer = inner.clone();
        let task_tracker = TaskTracker::new();
        task_tracker.spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, shutting down");
                    inner.cancel();
                },
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT, shutting down");
                    inner.cancel();
                }
            }
        });
        task_tracker.close();
        Ok(Self {
            task_tracker,
            cancellation_token: outer,
        })
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Waits for a shutdown signal and for the signal task to finish.
    pub async fn recv(&self) {
        self.cancellation_token.cancelled().await;
        self.task_tracker.wait().await;
    }
}
