//! Values the engine hands back to its caller.
//!
//! The engine never renders anything. Each selection returns a
//! [`SelectionOutcome`]; hosts forward outcomes and other [`SessionEvent`]s
//! to a presentation sink.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::{CardIndex, FaceId};
use crate::core::{Difficulty, InvalidSelection};

/// Session-level progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress,
    Completed,
}

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingFirstSelection,
    AwaitingSecondSelection { first: CardIndex },
    /// A mismatched pair is showing until `resolve_at` on the engine clock.
    Resolving {
        first: CardIndex,
        second: CardIndex,
        resolve_at: Duration,
    },
    Completed,
}

/// Summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub difficulty: Difficulty,
    pub elapsed: Duration,
    pub pairs: usize,
    /// Turns taken (pairs of cards compared).
    pub moves: u32,
}

impl Completion {
    /// Elapsed time in fractional seconds, as recorded in scores.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Result of one `select_card` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// First card of the turn is face-up.
    AwaitingSecond { first: CardIndex },

    /// The two cards share a face and stay up. `completion` is set on the
    /// move that finishes the game.
    Matched {
        first: CardIndex,
        second: CardIndex,
        face: FaceId,
        matched_pairs: usize,
        completion: Option<Completion>,
    },

    /// The two cards differ; both turn back at `resolve_at`.
    Mismatched {
        first: CardIndex,
        second: CardIndex,
        resolve_at: Duration,
    },

    /// A mismatch is still resolving; nothing changed.
    Ignored,
}

impl SelectionOutcome {
    /// Did this selection finish the game?
    #[must_use]
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            SelectionOutcome::Matched { completion, .. } => completion.as_ref(),
            _ => None,
        }
    }
}

/// Everything a presentation layer may want to hear about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new game was dealt.
    Started {
        game_id: u64,
        difficulty: Difficulty,
        cards: usize,
    },

    /// An accepted (or ignored) selection.
    Selection(SelectionOutcome),

    /// A refused selection, to surface as user feedback.
    Rejected(InvalidSelection),

    /// A mismatched pair went face-down again.
    MismatchResolved { first: CardIndex, second: CardIndex },

    /// Live elapsed time.
    Tick { elapsed: Duration },

    /// The last pair was found. Emitted once per game.
    Completed(Completion),
}
