//! Cancellable periodic timer for live elapsed-time displays.
//!
//! A [`Ticker`] owns a spawned tokio task. Stopping or dropping the ticker
//! aborts the task, so a finished or abandoned game never leaves a timer
//! running.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

/// Repeating timer calling back every `period`.
#[derive(Debug)]
pub struct Ticker {
    task: JoinHandle<()>,
    period: Duration,
}

impl Ticker {
    /// Spawn a ticker on the current tokio runtime.
    ///
    /// `on_tick` receives the 1-based tick number. The first call happens one
    /// full period after spawning. Must be called from within a runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            interval.tick().await;

            let mut count = 0u64;
            loop {
                interval.tick().await;
                count += 1;
                trace!(count, "tick");
                on_tick(count);
            }
        });

        Self { task, period }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the timer. No further callbacks run after this returns to the
    /// runtime.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
