//! Elapsed-time measurement.
//!
//! [`Stopwatch`] accumulates running time across start/stop cycles. Both
//! `start` and `stop` are idempotent; `reset` stops and zeroes.

use std::time::Duration;

use crate::core::{Clock, SystemClock};

/// Accumulating stopwatch over any [`Clock`].
#[derive(Clone, Debug)]
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    accumulated: Duration,
    running_since: Option<Duration>,
}

impl Stopwatch<SystemClock> {
    /// Stopwatch on wall-clock time.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SystemClock::new())
    }
}

impl Default for Stopwatch<SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

impl<C: Clock> Stopwatch<C> {
    /// A stopped stopwatch at zero.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            accumulated: Duration::ZERO,
            running_since: None,
        }
    }

    /// Start (or resume) accumulating. No effect while running.
    pub fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(self.clock.now());
        }
    }

    /// Freeze the accumulated time. No effect while stopped.
    pub fn stop(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += self.clock.now().saturating_sub(since);
        }
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        self.running_since = None;
        self.accumulated = Duration::ZERO;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Accumulated time, including the current run if running.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + self.clock.now().saturating_sub(since),
            None => self.accumulated,
        }
    }

    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Elapsed time as `SS.mmm` total seconds.
    #[must_use]
    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Format a duration as total seconds and milliseconds, `SS.mmm`.
///
/// Seconds are not split into minutes: 65 s is `"65.000"`.
///
/// ```
/// use std::time::Duration;
/// use memotest::timing::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(500)), "00.500");
/// assert_eq!(format_elapsed(Duration::from_millis(65_000)), "65.000");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    format!("{:02}.{:03}", millis / 1000, millis % 1000)
}
