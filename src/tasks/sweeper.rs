//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;

/// Sweep period used when none is configured.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Sweeper ==
/// Handle to a running sweep loop.
///
/// Stop it with [`Sweeper::shutdown`], which cancels and joins the task.
/// Dropping the handle cancels the loop without waiting for it.
#[derive(Debug)]
pub struct Sweeper {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawns a sweep loop over `cache` on the current tokio runtime.
    ///
    /// Each pass holds the store lock only while removing already-expired
    /// entries, so concurrent `get`/`set` callers wait at most that long.
    pub fn spawn<T>(cache: SharedCache<T>, interval: Duration) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let token = CancellationToken::new();
        let child = token.clone();

        let handle = tokio::spawn(async move {
            info!(interval_ms = interval.as_millis() as u64, "Starting cache expiry sweep");

            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                let removed = cache.sweep_expired().await;
                if removed > 0 {
                    info!("Expiry sweep: removed {} expired entries", removed);
                } else {
                    debug!("Expiry sweep: no expired entries found");
                }
            }

            debug!("Cache expiry sweep stopped");
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the loop and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("Expiry sweep task ended abnormally: {}", err);
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
