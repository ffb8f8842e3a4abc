//! Card system: faces, cards, decks.
//!
//! ## Key Types
//!
//! - `FaceId`: What a card shows. Exactly two cards share each face.
//! - `CardKey`: Unique identity of a card (face + pair half)
//! - `CardState`: Hidden / Revealed / Matched / Mismatched
//! - `Deck`: Ordered cards of one game
//! - `DeckBuilder`: Seeded sampling and shuffling

pub mod card;
pub mod deck;

pub use card::{Card, CardIndex, CardKey, CardState, FaceId};
pub use deck::{Deck, DeckBuilder};
