//! Core engine types: RNG, clocks, configuration, errors.
//!
//! These are the building blocks every other module depends on. Hosts
//! configure difficulties and timing through `GameConfig` rather than
//! touching the engine.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    Difficulty, DifficultyConfig, DifficultyTable, EngineConfig, GameConfig,
    DEFAULT_MISMATCH_DELAY, DEFAULT_TICK_INTERVAL,
};
pub use error::{AssetError, DeckError, Error, InvalidSelection, PersistenceError, Result, ScoreError};
pub use rng::{GameRng, GameRngState};
