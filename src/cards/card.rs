//! Cards on the board.
//!
//! A [`Card`] is one physical tile. Two cards share each [`FaceId`]; the
//! `second_of_pair` flag tells them apart so every card has a unique
//! [`CardKey`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier of a card face (e.g. an animal name or asset path).
///
/// Cheap to clone: the deck holds every face twice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(Arc<str>);

impl FaceId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FaceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FaceId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

/// Position of a card in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIndex(pub usize);

impl CardIndex {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Composite identity of a card: its face plus which half of the pair it is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardKey {
    pub face: FaceId,
    pub second_of_pair: bool,
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.face, u8::from(self.second_of_pair))
    }
}

/// Visible state of a card.
///
/// `Hidden -> Revealed -> {Matched | Hidden}`. `Mismatched` is shown while a
/// wrong pair waits to be turned back; it always returns to `Hidden`.
/// `Matched` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Hidden,
    Revealed,
    Matched,
    Mismatched,
}

impl CardState {
    /// Is the face currently shown?
    #[must_use]
    pub fn is_face_up(self) -> bool {
        !matches!(self, CardState::Hidden)
    }
}

/// One card in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub face: FaceId,
    pub second_of_pair: bool,
    pub state: CardState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(face: FaceId, second_of_pair: bool) -> Self {
        Self {
            face,
            second_of_pair,
            state: CardState::Hidden,
        }
    }

    #[must_use]
    pub fn key(&self) -> CardKey {
        CardKey {
            face: self.face.clone(),
            second_of_pair: self.second_of_pair,
        }
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Do two cards show the same face?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.face == other.face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_hidden() {
        let card = Card::new(FaceId::new("cat"), false);
        assert_eq!(card.state, CardState::Hidden);
        assert!(!card.state.is_face_up());
        assert!(!card.is_matched());
    }

    #[test]
    fn test_key_distinguishes_pair_halves() {
        let first = Card::new("cat".into(), false);
        let second = Card::new("cat".into(), true);

        assert!(first.pairs_with(&second));
        assert_ne!(first.key(), second.key());
        assert_eq!(second.key().to_string(), "cat/1");
    }

    #[test]
    fn test_face_up_states() {
        assert!(CardState::Revealed.is_face_up());
        assert!(CardState::Matched.is_face_up());
        assert!(CardState::Mismatched.is_face_up());
    }

    #[test]
    fn test_card_serde() {
        let card = Card::new(FaceId::new("dog"), true);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
