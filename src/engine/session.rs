//! The match engine: selection, comparison, resolution, completion.
//!
//! ## Turn cycle
//!
//! ```text
//! AwaitingFirstSelection --select--> AwaitingSecondSelection
//! AwaitingSecondSelection --select, same face--> AwaitingFirstSelection | Completed
//! AwaitingSecondSelection --select, other face--> Resolving
//! Resolving --deadline passed--> AwaitingFirstSelection
//! ```
//!
//! While resolving, selections are ignored. Refused selections
//! ([`InvalidSelection`]) never change state.
//!
//! The stopwatch starts on the first accepted selection, not when the game
//! is dealt, and stops exactly once when the last pair is matched.

use std::time::Duration;

use im::Vector;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, info, warn};

use super::outcome::{Completion, SelectionOutcome, SessionEvent, SessionStatus, TurnPhase};
use crate::cards::{Card, CardIndex, CardState, Deck};
use crate::core::{Clock, Difficulty, EngineConfig, InvalidSelection, SystemClock};
use crate::timing::{format_elapsed, Stopwatch};

/// Single-player pair-matching session.
///
/// Callers serialize calls; the engine is not meant for concurrent use.
#[derive(Clone, Debug)]
pub struct MatchEngine<C: Clock + Clone = SystemClock> {
    config: EngineConfig,
    clock: C,
    stopwatch: Stopwatch<C>,
    difficulty: Difficulty,
    deck: Deck,
    phase: TurnPhase,
    matched_pairs: usize,
    moves: u32,
    game_id: u64,
    completion: Option<Completion>,
}

impl MatchEngine<SystemClock> {
    /// Engine on wall-clock time.
    #[must_use]
    pub fn new(deck: Deck, difficulty: Difficulty, config: EngineConfig) -> Self {
        Self::with_clock(deck, difficulty, config, SystemClock::new())
    }
}

impl<C: Clock + Clone> MatchEngine<C> {
    /// Engine reading time from `clock`.
    pub fn with_clock(deck: Deck, difficulty: Difficulty, config: EngineConfig, clock: C) -> Self {
        info!(%difficulty, cards = deck.len(), "new game");
        Self {
            config,
            stopwatch: Stopwatch::new(clock.clone()),
            clock,
            difficulty,
            deck,
            phase: TurnPhase::AwaitingFirstSelection,
            matched_pairs: 0,
            moves: 0,
            game_id: 1,
            completion: None,
        }
    }

    /// Replace the deck and reset every counter, timer and held selection.
    ///
    /// Any pending mismatch from the previous game is dropped; resolution
    /// requests tagged with the old `game_id` become no-ops.
    pub fn new_game(&mut self, deck: Deck, difficulty: Difficulty) {
        self.game_id = self.game_id.wrapping_add(1);
        self.deck = deck;
        self.difficulty = difficulty;
        self.phase = TurnPhase::AwaitingFirstSelection;
        self.matched_pairs = 0;
        self.moves = 0;
        self.completion = None;
        self.stopwatch.reset();
        info!(game_id = self.game_id, %difficulty, cards = self.deck.len(), "new game");
    }

    /// Select the card at `index`.
    ///
    /// Returns `Ok(SelectionOutcome::Ignored)` while a mismatch is still
    /// showing. Returns `Err` for matched cards, re-selecting the held first
    /// card, or an index past the end of the deck; none of these change
    /// state.
    pub fn select_card(&mut self, index: CardIndex) -> Result<SelectionOutcome, InvalidSelection> {
        self.poll();

        if let TurnPhase::Resolving { .. } = self.phase {
            debug!(%index, "selection ignored while resolving");
            return Ok(SelectionOutcome::Ignored);
        }

        if let Err(err) = self.validate(index) {
            warn!(%err, "selection rejected");
            return Err(err);
        }

        self.stopwatch.start();

        let outcome = match self.phase {
            TurnPhase::AwaitingSecondSelection { first } => self.compare(first, index),
            _ => {
                self.deck.set_state(index, CardState::Revealed);
                self.phase = TurnPhase::AwaitingSecondSelection { first: index };
                SelectionOutcome::AwaitingSecond { first: index }
            }
        };
        debug!(?outcome, "selection");
        Ok(outcome)
    }

    /// Resolve a showing mismatch if its deadline has passed.
    ///
    /// Returns the pair that went face-down, if any.
    pub fn poll(&mut self) -> Option<(CardIndex, CardIndex)> {
        match self.phase {
            TurnPhase::Resolving { resolve_at, .. } if self.clock.now() >= resolve_at => {
                self.resolve_pending()
            }
            _ => None,
        }
    }

    /// Resolve a showing mismatch now, regardless of its deadline.
    pub fn resolve_pending(&mut self) -> Option<(CardIndex, CardIndex)> {
        let TurnPhase::Resolving { first, second, .. } = self.phase else {
            return None;
        };
        self.deck.set_state(first, CardState::Hidden);
        self.deck.set_state(second, CardState::Hidden);
        self.phase = TurnPhase::AwaitingFirstSelection;
        debug!(%first, %second, "mismatch resolved");
        Some((first, second))
    }

    /// Like [`resolve_pending`](Self::resolve_pending), but only for the game
    /// that scheduled it.
    pub fn resolve_pending_for(&mut self, game_id: u64) -> Option<(CardIndex, CardIndex)> {
        if game_id != self.game_id {
            debug!(game_id, current = self.game_id, "stale resolution skipped");
            return None;
        }
        self.resolve_pending()
    }

    fn validate(&self, index: CardIndex) -> Result<(), InvalidSelection> {
        let card = self.deck.get(index).ok_or(InvalidSelection::UnknownCard {
            index: index.raw(),
            len: self.deck.len(),
        })?;
        if card.is_matched() {
            return Err(InvalidSelection::AlreadyMatched(index));
        }
        if self.phase == (TurnPhase::AwaitingSecondSelection { first: index }) {
            return Err(InvalidSelection::SameCard(index));
        }
        Ok(())
    }

    fn compare(&mut self, first: CardIndex, second: CardIndex) -> SelectionOutcome {
        self.moves += 1;
        self.deck.set_state(second, CardState::Revealed);

        let face = match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b)) if a.pairs_with(b) => Some(a.face.clone()),
            _ => None,
        };

        match face {
            Some(face) => {
                self.deck.set_state(first, CardState::Matched);
                self.deck.set_state(second, CardState::Matched);
                self.matched_pairs += 1;
                self.phase = TurnPhase::AwaitingFirstSelection;

                let completion = if self.matched_pairs == self.deck.pair_count() {
                    self.complete()
                } else {
                    None
                };

                SelectionOutcome::Matched {
                    first,
                    second,
                    face,
                    matched_pairs: self.matched_pairs,
                    completion,
                }
            }
            None => {
                self.deck.set_state(first, CardState::Mismatched);
                self.deck.set_state(second, CardState::Mismatched);
                let resolve_at = self.clock.now() + self.config.mismatch_delay;
                self.phase = TurnPhase::Resolving {
                    first,
                    second,
                    resolve_at,
                };
                SelectionOutcome::Mismatched {
                    first,
                    second,
                    resolve_at,
                }
            }
        }
    }

    fn complete(&mut self) -> Option<Completion> {
        if self.completion.is_some() {
            return None;
        }
        self.stopwatch.stop();
        self.phase = TurnPhase::Completed;

        let completion = Completion {
            difficulty: self.difficulty,
            elapsed: self.stopwatch.elapsed(),
            pairs: self.matched_pairs,
            moves: self.moves,
        };
        info!(
            game_id = self.game_id,
            elapsed = %format_elapsed(completion.elapsed),
            moves = self.moves,
            "game completed"
        );
        self.completion = Some(completion.clone());
        Some(completion)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generation counter, bumped by every [`new_game`](Self::new_game).
    #[must_use]
    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Board snapshot. O(1) to clone.
    #[must_use]
    pub fn cards(&self) -> Vector<Card> {
        self.deck.cards().clone()
    }

    #[must_use]
    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.deck.get(index)
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.completion.is_some() {
            SessionStatus::Completed
        } else {
            SessionStatus::InProgress
        }
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, TurnPhase::Resolving { .. })
    }

    /// Cards currently held for this turn (zero, one or two).
    #[must_use]
    pub fn selection(&self) -> SmallVec<[CardIndex; 2]> {
        match self.phase {
            TurnPhase::AwaitingSecondSelection { first } => smallvec![first],
            TurnPhase::Resolving { first, second, .. } => smallvec![first, second],
            TurnPhase::AwaitingFirstSelection | TurnPhase::Completed => SmallVec::new(),
        }
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.deck.pair_count()
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    /// Time played so far (frozen once completed).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    /// Time played as `SS.mmm`.
    #[must_use]
    pub fn formatted_elapsed(&self) -> String {
        self.stopwatch.formatted()
    }

    #[must_use]
    pub fn stopwatch(&self) -> &Stopwatch<C> {
        &self.stopwatch
    }

    /// Event announcing the current deal.
    #[must_use]
    pub fn started_event(&self) -> SessionEvent {
        SessionEvent::Started {
            game_id: self.game_id,
            difficulty: self.difficulty,
            cards: self.deck.len(),
        }
    }
}
