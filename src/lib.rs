//! # memotest
//!
//! Engine for a single-player memory matching game: a shuffled board of
//! face-down cards in pairs, flipped two at a time until every pair is
//! found. The clear time is recorded and ranked per difficulty.
//!
//! ## Design Principles
//!
//! 1. **Headless**: The engine returns outcomes and publishes events; it
//!    never draws anything. Rendering belongs to a [`PresentationSink`].
//!
//! 2. **Injected Time**: Mismatch delays and the stopwatch read a
//!    [`Clock`]. Tests drive a [`ManualClock`]; hosts use wall time.
//!
//! 3. **Reproducible Deals**: Deck sampling and shuffling go through a
//!    seeded ChaCha RNG, so a seed fixes the board.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG, clocks
//! - `cards`: Cards, faces, and the deck builder
//! - `assets`: Where card faces and their images come from
//! - `timing`: Stopwatch and periodic ticker
//! - `engine`: The match state machine and its live driver
//! - `scores`: Score recording and leaderboards

pub mod assets;
pub mod cards;
pub mod core;
pub mod engine;
pub mod scores;
pub mod timing;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, SystemClock,
    Difficulty, DifficultyConfig, DifficultyTable, EngineConfig, GameConfig,
    DeckError, Error, InvalidSelection, Result, ScoreError,
    GameRng, GameRngState,
};

pub use crate::cards::{Card, CardIndex, CardState, Deck, DeckBuilder, FaceId};

pub use crate::assets::{AssetSource, StaticAssetSource};

pub use crate::timing::{format_elapsed, Stopwatch, Ticker};

pub use crate::engine::{
    Completion, LiveSession, MatchEngine, PresentationSink, SelectionOutcome,
    SessionBuilder, SessionEvent, SessionStatus, TurnPhase,
};

pub use crate::scores::{
    InMemoryPersistence, OwnerId, PersistenceService, RankedScore, ScoreRecord, ScoreReporter,
};
