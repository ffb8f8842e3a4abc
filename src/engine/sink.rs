//! Presentation sink contract.
//!
//! The engine and live session push [`SessionEvent`]s into a sink; the sink
//! decides how to show them. [`RecordingSink`] keeps them in memory.

use std::sync::{Mutex, PoisonError};

use super::outcome::SessionEvent;

/// Consumer of session events.
pub trait PresentationSink: Send + Sync {
    fn publish(&self, event: &SessionEvent);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn publish(&self, _event: &SessionEvent) {}
}

/// Stores every event in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events so far.
    #[must_use]
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Count events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&SessionEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| predicate(event))
            .count()
    }
}

impl PresentationSink for RecordingSink {
    fn publish(&self, event: &SessionEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
