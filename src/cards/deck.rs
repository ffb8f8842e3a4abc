//! Deck construction.
//!
//! [`DeckBuilder`] turns a pair count and a list of available faces into a
//! shuffled [`Deck`]:
//!
//! 1. Pick `pair_count` distinct faces, uniformly without replacement.
//! 2. Create two face-down cards per face (`second_of_pair` false/true).
//! 3. Apply a uniform random permutation to the whole sequence.
//!
//! ```
//! use memotest::cards::{DeckBuilder, FaceId};
//!
//! let faces: Vec<FaceId> = ["cat", "dog", "owl", "fox"].into_iter().map(FaceId::from).collect();
//! let mut builder = DeckBuilder::with_seed(42);
//! let deck = builder.build(3, &faces).unwrap();
//! assert_eq!(deck.len(), 6);
//! ```

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, CardIndex, CardState, FaceId};
use crate::core::{DeckError, GameRng};

/// Ordered cards of one game.
///
/// Composition is fixed once built; only card states change. Backed by a
/// persistent vector so snapshots are O(1) to clone.
///
/// Serializes as a plain card list; deserializing runs the same checks as
/// [`Deck::from_cards`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Build a deck from cards in a fixed order.
    ///
    /// Every face must appear exactly twice, once as each half of the pair,
    /// and every card must be hidden.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, DeckError> {
        let cards: Vector<Card> = cards.into_iter().collect();
        if cards.is_empty() {
            return Err(DeckError::EmptyDeck);
        }

        if let Some((index, card)) = cards
            .iter()
            .enumerate()
            .find(|(_, card)| card.state != CardState::Hidden)
        {
            return Err(DeckError::CardNotHidden {
                index,
                state: card.state,
            });
        }

        let mut halves: FxHashMap<&FaceId, [u8; 2]> = FxHashMap::default();
        for card in &cards {
            halves.entry(&card.face).or_insert([0, 0])[usize::from(card.second_of_pair)] += 1;
        }
        if let Some((face, _)) = halves.iter().find(|(_, seen)| **seen != [1, 1]) {
            return Err(DeckError::MalformedPair {
                face: face.to_string(),
            });
        }

        Ok(Self { cards })
    }

    /// Build an unshuffled deck laying out each face's pair side by side.
    ///
    /// Handy for scripted games and tests: `[a, a, b, b, ...]`.
    pub fn paired_in_order(faces: &[FaceId]) -> Result<Self, DeckError> {
        Self::from_cards(
            faces
                .iter()
                .flat_map(|face| [Card::new(face.clone(), false), Card::new(face.clone(), true)]),
        )
    }

    /// Number of cards (twice the pair count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn get(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index.raw())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The underlying persistent vector.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Distinct faces in first-appearance order.
    #[must_use]
    pub fn faces(&self) -> Vec<FaceId> {
        let mut seen = FxHashSet::default();
        self.cards
            .iter()
            .filter(|card| seen.insert(&card.face))
            .map(|card| card.face.clone())
            .collect()
    }

    /// Count cards in a given state.
    #[must_use]
    pub fn count_in_state(&self, state: CardState) -> usize {
        self.cards.iter().filter(|card| card.state == state).count()
    }

    pub(crate) fn set_state(&mut self, index: CardIndex, state: CardState) {
        if let Some(card) = self.cards.get_mut(index.raw()) {
            card.state = state;
        }
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = DeckError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::from_cards(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards.into_iter().collect()
    }
}

/// Builds shuffled decks from a seeded RNG.
#[derive(Clone, Debug, Default)]
pub struct DeckBuilder {
    rng: GameRng,
}

impl DeckBuilder {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Deterministic builder: the same seed yields the same sequence of decks.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Build a shuffled deck of `pair_count` pairs.
    ///
    /// Repeated entries in `available` count once. Fails before creating any
    /// card if there are fewer distinct faces than requested pairs.
    pub fn build(&mut self, pair_count: usize, available: &[FaceId]) -> Result<Deck, DeckError> {
        if pair_count == 0 {
            return Err(DeckError::EmptyDeck);
        }

        let mut seen = FxHashSet::default();
        let distinct: Vec<&FaceId> = available.iter().filter(|face| seen.insert(*face)).collect();
        if distinct.len() < pair_count {
            return Err(DeckError::InsufficientFaces {
                requested: pair_count,
                available: distinct.len(),
            });
        }

        let mut cards = Vec::with_capacity(pair_count * 2);
        for index in self.rng.sample_indices(distinct.len(), pair_count) {
            let face = distinct[index];
            cards.push(Card::new(face.clone(), false));
            cards.push(Card::new(face.clone(), true));
        }
        self.rng.shuffle(&mut cards);

        debug!(pair_count, available = distinct.len(), "deck built");

        Ok(Deck {
            cards: cards.into_iter().collect(),
        })
    }
}
