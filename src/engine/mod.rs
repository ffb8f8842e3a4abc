//! Match engine: the pair-matching state machine and its drivers.
//!
//! - [`MatchEngine`]: selection, comparison, mismatch resolution, completion
//! - [`SessionBuilder`]: deal a game from a difficulty and an asset source
//! - [`LiveSession`]: tokio-driven wrapper with real timers
//! - [`PresentationSink`]: where outcomes and events are published
//!
//! ## Example
//!
//! ```
//! use memotest::cards::{CardIndex, Deck, FaceId};
//! use memotest::core::{Difficulty, EngineConfig};
//! use memotest::engine::{MatchEngine, SelectionOutcome};
//!
//! let deck = Deck::paired_in_order(&[FaceId::new("cat"), FaceId::new("dog")]).unwrap();
//! let mut engine = MatchEngine::new(deck, Difficulty::Easy, EngineConfig::default());
//!
//! engine.select_card(CardIndex::new(0)).unwrap();
//! let outcome = engine.select_card(CardIndex::new(1)).unwrap();
//! assert!(matches!(outcome, SelectionOutcome::Matched { matched_pairs: 1, .. }));
//! ```

mod builder;
mod live;
mod outcome;
mod session;
mod sink;

pub use builder::{face_urls, SessionBuilder};
pub use live::LiveSession;
pub use outcome::{Completion, SelectionOutcome, SessionEvent, SessionStatus, TurnPhase};
pub use session::MatchEngine;
pub use sink::{NullSink, PresentationSink, RecordingSink};
