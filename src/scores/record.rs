//! Score records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::persistence::Document;
use crate::core::Difficulty;

/// Identifier of the player a score belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One completed game. Immutable once recorded.
///
/// Field names on the wire (`userDocId`, `date`) follow the stored
/// collection format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "userDocId")]
    pub owner_id: OwnerId,
    pub difficulty: Difficulty,
    /// Fractional seconds taken to clear the board.
    pub seconds: f64,
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Encode as a persistence document.
    pub fn to_document(&self) -> Result<Document, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(serde::ser::Error::custom("score record is not an object")),
        }
    }

    /// Decode from a persistence document.
    pub fn from_document(document: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(document))
    }
}

/// A score placed in a leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedScore {
    /// 1-based rank.
    pub position: usize,
    pub record: ScoreRecord,
    /// The record belongs to the player viewing the board.
    pub is_viewer: bool,
}
