//! Session setup: difficulty + asset source -> dealt engine.

use tracing::info;

use super::session::MatchEngine;
use crate::assets::AssetSource;
use crate::cards::{Deck, DeckBuilder, FaceId};
use crate::core::{
    AssetError, Clock, Difficulty, DifficultyTable, EngineConfig, Error, GameConfig, GameRng, Result,
    SystemClock,
};

/// Builder for a dealt [`MatchEngine`].
///
/// ```
/// use memotest::assets::StaticAssetSource;
/// use memotest::core::Difficulty;
/// use memotest::engine::SessionBuilder;
///
/// let source = StaticAssetSource::new("https://cdn.example.com")
///     .with_topic("animals", ["cat", "dog", "owl", "fox", "bee", "ant", "elk", "yak"]);
///
/// let engine = SessionBuilder::new()
///     .difficulty(Difficulty::Easy)
///     .seed(42)
///     .build(&source)
///     .unwrap();
/// assert_eq!(engine.deck().len(), 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionBuilder {
    config: GameConfig,
    difficulty: Difficulty,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: GameConfig) -> Self {
        Self {
            config,
            difficulty: Difficulty::default(),
        }
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn engine_config(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    pub fn difficulties(mut self, table: DifficultyTable) -> Self {
        self.config.difficulties = table;
        self
    }

    /// Fix the deck seed for reproducible deals.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// A deck builder seeded from the configuration (or the OS).
    pub fn deck_builder(&self) -> DeckBuilder {
        match self.config.seed {
            Some(seed) => DeckBuilder::with_seed(seed),
            None => DeckBuilder::new(GameRng::from_entropy()),
        }
    }

    /// Deal a deck for the configured difficulty.
    ///
    /// Fails before any card exists if the difficulty has no board, the
    /// topic is unknown, or the topic has too few faces.
    pub fn deal<A: AssetSource + ?Sized>(&self, source: &A, builder: &mut DeckBuilder) -> Result<Deck> {
        let board = self
            .config
            .difficulties
            .get(self.difficulty)
            .ok_or(Error::UnconfiguredDifficulty(self.difficulty))?;
        let faces = source.list_faces(&board.topic)?;
        Ok(builder.build(board.pair_count, &faces)?)
    }

    /// Deal and create an engine on wall-clock time.
    pub fn build<A: AssetSource + ?Sized>(self, source: &A) -> Result<MatchEngine> {
        self.build_with_clock(source, SystemClock::new())
    }

    /// Deal and create an engine on a custom clock.
    pub fn build_with_clock<A, C>(self, source: &A, clock: C) -> Result<MatchEngine<C>>
    where
        A: AssetSource + ?Sized,
        C: Clock + Clone,
    {
        let deck = self.deal(source, &mut self.deck_builder())?;
        info!(difficulty = %self.difficulty, seed = ?self.config.seed, "session dealt");
        Ok(MatchEngine::with_clock(
            deck,
            self.difficulty,
            self.config.engine,
            clock,
        ))
    }
}

/// Display URL for every distinct face in a deck, in first-appearance order.
pub fn face_urls<A: AssetSource + ?Sized>(
    deck: &Deck,
    source: &A,
) -> std::result::Result<Vec<(FaceId, String)>, AssetError> {
    deck.faces()
        .into_iter()
        .map(|face| {
            let url = source.resolve_url(&face)?;
            Ok((face, url))
        })
        .collect()
}
