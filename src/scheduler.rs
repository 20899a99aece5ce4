// scheduler.rs - Fixed-interval callback on an owned background task

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

struct Worker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Fires a callback at a fixed wall-clock period on its own tokio task.
///
/// Each scheduler owns exactly one task; there is no shared timer registry.
/// The first callback fires immediately on start, then once per period. A
/// callback that overruns the period delays the next one — missed ticks are
/// never replayed in a burst.
pub struct TickScheduler {
    period: Duration,
    worker: Option<Worker>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        TickScheduler {
            period,
            worker: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts the timer. Idempotent: an already-running timer is stopped
    /// first, so two timers never run concurrently.
    pub async fn start<F>(&mut self, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop().await;

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = interval.tick() => on_tick(),
                }
            }
        });
        self.worker = Some(Worker { shutdown, handle });
        debug!(period_ms = period.as_millis() as u64, "scheduler started");
    }

    /// Cancels the timer and waits for the task to finish. No callback runs
    /// after this returns. Idempotent.
    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.shutdown.send(true);
            let _ = worker.handle.await;
            debug!("scheduler stopped");
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        // Backstop for callers that drop without stopping; `stop()` is the
        // supported path since Drop cannot await the task.
        if let Some(worker) = self.worker.take() {
            worker.handle.abort();
        }
    }
}
