//! Score reporting and leaderboards.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::persistence::{Document, PersistenceService};
use super::record::{OwnerId, RankedScore, ScoreRecord};
use crate::core::{Difficulty, PersistenceError, ScoreError};
use crate::engine::Completion;

/// Collection that holds score records.
pub const SCORES_COLLECTION: &str = "memoScores";

/// Leaderboard length when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 5;

const ORDER_FIELD: &str = "seconds";
const DIFFICULTY_FIELD: &str = "difficulty";

/// Records completed games and reads back the fastest ones.
///
/// ```
/// use memotest::core::Difficulty;
/// use memotest::scores::{InMemoryPersistence, OwnerId, ScoreReporter};
///
/// let reporter = ScoreReporter::new(InMemoryPersistence::new());
/// let me = OwnerId::new("me");
/// reporter.record_score(&me, Difficulty::Easy, 31.2).unwrap();
/// reporter.record_score(&me, Difficulty::Easy, 18.9).unwrap();
///
/// let top = reporter.top_scores(Difficulty::Easy, 5).unwrap();
/// assert_eq!(top[0].seconds, 18.9);
/// ```
#[derive(Debug)]
pub struct ScoreReporter<P: PersistenceService> {
    store: P,
    collection: String,
}

impl<P: PersistenceService> ScoreReporter<P> {
    pub fn new(store: P) -> Self {
        Self {
            store,
            collection: SCORES_COLLECTION.to_string(),
        }
    }

    /// Use a different collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persist a score stamped with the current time.
    pub fn record_score(
        &self,
        owner: &OwnerId,
        difficulty: Difficulty,
        seconds: f64,
    ) -> Result<ScoreRecord, ScoreError> {
        self.record_score_at(owner, difficulty, seconds, Utc::now())
    }

    /// Persist a score with an explicit timestamp.
    ///
    /// Non-finite or negative times are rejected before anything is stored.
    pub fn record_score_at(
        &self,
        owner: &OwnerId,
        difficulty: Difficulty,
        seconds: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<ScoreRecord, ScoreError> {
        if !seconds.is_finite() || seconds < 0.0 {
            warn!(%owner, seconds, "rejected invalid score");
            return Err(ScoreError::InvalidScore(seconds));
        }

        let record = ScoreRecord {
            owner_id: owner.clone(),
            difficulty,
            seconds,
            recorded_at,
        };
        let document = record.to_document().map_err(PersistenceError::from)?;
        self.store.append(&self.collection, document)?;

        info!(%owner, %difficulty, seconds, "score recorded");
        Ok(record)
    }

    /// Persist the result of a finished game.
    pub fn record_completion(
        &self,
        owner: &OwnerId,
        completion: &Completion,
    ) -> Result<ScoreRecord, ScoreError> {
        self.record_score(owner, completion.difficulty, completion.seconds())
    }

    /// Up to `limit` fastest records for one difficulty, ascending by time.
    /// Equal times keep the order they were recorded in.
    ///
    /// Only documents tagged with `difficulty` are decoded; a malformed one
    /// fails this board with [`ScoreError::Decode`] but leaves the others
    /// readable.
    pub fn top_scores(
        &self,
        difficulty: Difficulty,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, ScoreError> {
        let documents = self.store.query(&self.collection, ORDER_FIELD)?;

        let mut records = Vec::with_capacity(limit.min(documents.len()));
        for document in documents {
            if document_difficulty(&document) != Some(difficulty) {
                continue;
            }
            records.push(ScoreRecord::from_document(document).map_err(ScoreError::Decode)?);
        }
        // Backend order is not relied on.
        records.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
        records.truncate(limit);

        debug!(%difficulty, limit, returned = records.len(), "top scores queried");
        Ok(records)
    }

    /// Ranked top scores, flagging the viewer's own entries.
    pub fn leaderboard(
        &self,
        difficulty: Difficulty,
        limit: usize,
        viewer: Option<&OwnerId>,
    ) -> Result<Vec<RankedScore>, ScoreError> {
        Ok(self
            .top_scores(difficulty, limit)?
            .into_iter()
            .enumerate()
            .map(|(rank, record)| RankedScore {
                position: rank + 1,
                is_viewer: viewer.is_some_and(|v| *v == record.owner_id),
                record,
            })
            .collect())
    }
}

/// The difficulty a stored document is tagged with, if it parses.
fn document_difficulty(document: &Document) -> Option<Difficulty> {
    let value = document.get(DIFFICULTY_FIELD)?;
    Difficulty::deserialize(value).ok()
}
