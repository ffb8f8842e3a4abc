//! Scores: recording completed games and reading leaderboards.
//!
//! [`ScoreReporter`] validates and stores [`ScoreRecord`]s through a
//! [`PersistenceService`], and ranks them per difficulty.

mod persistence;
mod record;
mod reporter;

pub use persistence::{Document, InMemoryPersistence, PersistenceService};
pub use record::{OwnerId, RankedScore, ScoreRecord};
pub use reporter::{ScoreReporter, DEFAULT_LIMIT, SCORES_COLLECTION};
