//! Game configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `DifficultyTable`: static `Difficulty -> (pair count, topic)` mapping
//! - `EngineConfig`: timing constants (mismatch delay, tick interval)
//! - `GameConfig`: combines all configuration, loadable from JSON
//!
//! The engine never derives difficulty settings at runtime.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Default delay before a mismatched pair turns face-down again.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(750);

/// Default period of the live elapsed-time display.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Difficulty level chosen by the player.
///
/// Serialized as `"easy"`, `"mid"`, `"hard"`, the format stored with
/// score records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "mid")]
    Medium,
    #[serde(rename = "hard")]
    Hard,
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Stable key used in persisted records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "mid",
            Difficulty::Hard => "hard",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Board shape for one difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Number of distinct faces; the deck holds twice as many cards.
    pub pair_count: usize,

    /// Asset topic the faces are drawn from.
    pub topic: String,
}

impl DifficultyConfig {
    pub fn new(pair_count: usize, topic: impl Into<String>) -> Self {
        Self {
            pair_count,
            topic: topic.into(),
        }
    }

    /// Cards on the board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.pair_count * 2
    }
}

/// Static mapping from difficulty to board shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyTable {
    entries: FxHashMap<Difficulty, DifficultyConfig>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::empty()
            .with_entry(Difficulty::Easy, DifficultyConfig::new(3, "animals"))
            .with_entry(Difficulty::Medium, DifficultyConfig::new(6, "animals"))
            .with_entry(Difficulty::Hard, DifficultyConfig::new(8, "animals"))
    }
}

impl DifficultyTable {
    /// A table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Set (or replace) the shape for a difficulty.
    #[must_use]
    pub fn with_entry(mut self, difficulty: Difficulty, config: DifficultyConfig) -> Self {
        self.entries.insert(difficulty, config);
        self
    }

    /// Get the shape for a difficulty.
    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> Option<&DifficultyConfig> {
        self.entries.get(&difficulty)
    }
}

/// Engine timing constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How long a mismatched pair stays visible before hiding again.
    #[serde(with = "millis")]
    pub mismatch_delay: Duration,

    /// Period of the live elapsed-time notifications.
    #[serde(with = "millis")]
    pub tick_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl EngineConfig {
    /// Set the mismatch resolution delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Set the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub difficulties: DifficultyTable,

    /// Fixed deck seed. `None` seeds from the OS for every game.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = DifficultyTable::default();

        let easy = table.get(Difficulty::Easy).unwrap();
        assert_eq!(easy.pair_count, 3);
        assert_eq!(easy.card_count(), 6);

        for difficulty in Difficulty::ALL {
            assert!(table.get(difficulty).is_some());
        }
    }

    #[test]
    fn test_table_override() {
        let table = DifficultyTable::default()
            .with_entry(Difficulty::Hard, DifficultyConfig::new(10, "tools"));

        let hard = table.get(Difficulty::Hard).unwrap();
        assert_eq!(hard.pair_count, 10);
        assert_eq!(hard.topic, "tools");
        assert!(DifficultyTable::empty().get(Difficulty::Easy).is_none());
    }

    #[test]
    fn test_difficulty_serde_names() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"mid\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert_eq!(Difficulty::Easy.as_str(), "easy");
        assert_eq!(format!("{}", Difficulty::Medium), "Medium");
    }

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.mismatch_delay, Duration::from_millis(750));
        assert_eq!(config.tick_interval, Duration::from_millis(100));

        let slow = config.with_mismatch_delay(Duration::from_millis(1500));
        assert_eq!(slow.mismatch_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_game_config_from_json() {
        let config = GameConfig::from_json_str(
            r#"{ "engine": { "mismatch_delay": 1500 }, "seed": 7 }"#,
        )
        .unwrap();

        assert_eq!(config.engine.mismatch_delay, Duration::from_millis(1500));
        assert_eq!(config.engine.tick_interval, DEFAULT_TICK_INTERVAL);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.difficulties, DifficultyTable::default());

        let config = GameConfig::from_json_str(
            r#"{ "difficulties": {
                "easy": { "pair_count": 2, "topic": "tools" },
                "hard": { "pair_count": 10, "topic": "flags" }
            } }"#,
        )
        .unwrap();

        let easy = config.difficulties.get(Difficulty::Easy).unwrap();
        assert_eq!((easy.pair_count, easy.topic.as_str()), (2, "tools"));
        assert_eq!(config.difficulties.get(Difficulty::Hard).unwrap().pair_count, 10);
        assert!(config.difficulties.get(Difficulty::Medium).is_none());
        assert_eq!(config.engine, EngineConfig::default());
    }
}
