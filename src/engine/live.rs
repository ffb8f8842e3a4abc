//! Live sessions: a match engine driven by real timers.
//!
//! [`LiveSession`] wraps a [`MatchEngine`] for interactive hosts. It
//! forwards every outcome to a [`PresentationSink`], schedules mismatch
//! resolution on a tokio task, and runs the elapsed-time [`Ticker`] while
//! the game is being played.
//!
//! Starting a new game or dropping the session cancels the ticker and any
//! pending resolution.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::debug;

use super::outcome::{SelectionOutcome, SessionEvent};
use super::session::MatchEngine;
use super::sink::PresentationSink;
use crate::cards::{CardIndex, Deck};
use crate::core::{Clock, Difficulty, InvalidSelection, SystemClock};
use crate::timing::Ticker;

type SharedEngine<C> = Arc<Mutex<MatchEngine<C>>>;

fn lock<C: Clock + Clone>(engine: &Mutex<MatchEngine<C>>) -> MutexGuard<'_, MatchEngine<C>> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Timer-driven session. Methods that may start timers must run inside a
/// tokio runtime.
pub struct LiveSession<S, C = SystemClock>
where
    S: PresentationSink + 'static,
    C: Clock + Clone + Send + 'static,
{
    engine: SharedEngine<C>,
    sink: Arc<S>,
    ticker: Option<Ticker>,
    pending: Option<JoinHandle<()>>,
}

impl<S, C> LiveSession<S, C>
where
    S: PresentationSink + 'static,
    C: Clock + Clone + Send + 'static,
{
    /// Wrap an engine and announce its deal.
    pub fn new(engine: MatchEngine<C>, sink: Arc<S>) -> Self {
        sink.publish(&engine.started_event());
        Self {
            engine: Arc::new(Mutex::new(engine)),
            sink,
            ticker: None,
            pending: None,
        }
    }

    /// Select a card and publish the result.
    pub fn select(&mut self, index: CardIndex) -> Result<SelectionOutcome, InvalidSelection> {
        let (resolved, result) = {
            let mut engine = lock(&self.engine);
            (engine.poll(), engine.select_card(index))
        };

        if let Some((first, second)) = resolved {
            self.cancel_pending();
            self.sink.publish(&SessionEvent::MismatchResolved { first, second });
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                self.sink.publish(&SessionEvent::Rejected(err));
                return Err(err);
            }
        };

        self.sink.publish(&SessionEvent::Selection(outcome.clone()));
        match &outcome {
            SelectionOutcome::AwaitingSecond { .. } => self.ensure_ticker(),
            SelectionOutcome::Matched {
                completion: Some(completion),
                ..
            } => {
                self.stop_ticker();
                self.sink.publish(&SessionEvent::Completed(completion.clone()));
            }
            SelectionOutcome::Matched { .. } => {}
            SelectionOutcome::Mismatched { .. } => self.schedule_resolution(),
            SelectionOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    /// Abandon the current game and deal a new one.
    pub fn new_game(&mut self, deck: Deck, difficulty: Difficulty) {
        self.cancel_pending();
        self.stop_ticker();
        let started = {
            let mut engine = lock(&self.engine);
            engine.new_game(deck, difficulty);
            engine.started_event()
        };
        self.sink.publish(&started);
    }

    /// Borrow the engine. Do not hold the guard across an await point.
    pub fn engine(&self) -> MutexGuard<'_, MatchEngine<C>> {
        lock(&self.engine)
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    #[must_use]
    pub fn has_pending_resolution(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn ensure_ticker(&mut self) {
        if self.is_ticking() {
            return;
        }
        let period = lock(&self.engine).config().tick_interval;
        let engine = Arc::downgrade(&self.engine);
        let sink = self.sink.clone();
        self.ticker = Some(Ticker::spawn(period, move |_| {
            if let Some(engine) = engine.upgrade() {
                let elapsed = lock(&engine).elapsed();
                sink.publish(&SessionEvent::Tick { elapsed });
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    fn schedule_resolution(&mut self) {
        self.cancel_pending();
        let (game_id, delay) = {
            let engine = lock(&self.engine);
            (engine.game_id(), engine.config().mismatch_delay)
        };
        let engine = Arc::downgrade(&self.engine);
        let sink = self.sink.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(engine) = engine.upgrade() else {
                return;
            };
            let resolved = lock(&engine).resolve_pending_for(game_id);
            if let Some((first, second)) = resolved {
                sink.publish(&SessionEvent::MismatchResolved { first, second });
            }
        }));
        debug!(game_id, ?delay, "mismatch resolution scheduled");
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl<S, C> Drop for LiveSession<S, C>
where
    S: PresentationSink + 'static,
    C: Clock + Clone + Send + 'static,
{
    fn drop(&mut self) {
        self.cancel_pending();
        self.stop_ticker();
    }
}
