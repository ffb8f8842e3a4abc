//! Error taxonomy.
//!
//! - [`DeckError`]: deck construction failed; no partial deck is exposed.
//! - [`InvalidSelection`]: a disallowed pick; recoverable, no state change.
//! - [`ScoreError`]: score rejected or persistence failed.
//! - [`AssetError`]: the asset source could not supply faces.
//!
//! [`Error`] wraps the setup-time errors for callers that chain them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardIndex, CardState};

/// Errors from building a deck.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("not enough faces: {requested} pairs requested, {available} faces available")]
    InsufficientFaces { requested: usize, available: usize },

    #[error("a deck needs at least one pair")]
    EmptyDeck,

    #[error("face {face} does not appear exactly once as each half of a pair")]
    MalformedPair { face: String },

    #[error("card #{index} is dealt face-up ({state:?}); new decks start hidden")]
    CardNotHidden { index: usize, state: CardState },
}

/// A selection the engine refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidSelection {
    #[error("card {0} is already matched")]
    AlreadyMatched(CardIndex),

    #[error("card {0} is already the first selection")]
    SameCard(CardIndex),

    #[error("no card at index {index} (board has {len} cards)")]
    UnknownCard { index: usize, len: usize },
}

impl InvalidSelection {
    /// The index the caller tried to select.
    #[must_use]
    pub fn index(&self) -> usize {
        match *self {
            InvalidSelection::AlreadyMatched(card) | InvalidSelection::SameCard(card) => card.raw(),
            InvalidSelection::UnknownCard { index, .. } => index,
        }
    }
}

/// Errors raised by a persistence service.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("persistence lock was poisoned")]
    LockPoisoned,

    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors from the score reporter.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("invalid score: {0} seconds (must be finite and non-negative)")]
    InvalidScore(f64),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("stored record could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Errors from an asset source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("no asset for face: {0}")]
    UnknownFace(String),
}

/// Session setup errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no board configured for difficulty {0}")]
    UnconfiguredDifficulty(crate::core::Difficulty),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
