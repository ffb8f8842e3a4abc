//! Deck construction tests.
//!
//! Covers the deck invariants for arbitrary pair counts and face pools,
//! plus the failure modes of the builder.

use memotest::cards::{CardState, DeckBuilder, FaceId};
use memotest::core::DeckError;
use proptest::prelude::*;
use rustc_hash::FxHashMap;

fn pool(n: usize) -> Vec<FaceId> {
    (0..n).map(|i| FaceId::new(format!("face-{i}"))).collect()
}

// =============================================================================
// Invariant Tests
// =============================================================================

proptest! {
    #[test]
    fn test_deck_invariants(seed in any::<u64>(), pairs in 1usize..12, extra in 0usize..8) {
        let faces = pool(pairs + extra);
        let deck = DeckBuilder::with_seed(seed).build(pairs, &faces).unwrap();

        prop_assert_eq!(deck.len(), pairs * 2);
        prop_assert_eq!(deck.count_in_state(CardState::Hidden), pairs * 2);

        let mut halves: FxHashMap<FaceId, (usize, usize)> = FxHashMap::default();
        for card in deck.iter() {
            let entry = halves.entry(card.face.clone()).or_default();
            if card.second_of_pair {
                entry.1 += 1;
            } else {
                entry.0 += 1;
            }
        }
        prop_assert_eq!(halves.len(), pairs);
        for (face, counts) in &halves {
            prop_assert_eq!(*counts, (1, 1));
            prop_assert!(faces.contains(face));
        }
    }

    #[test]
    fn test_same_seed_same_deck(seed in any::<u64>()) {
        let faces = pool(10);
        let a = DeckBuilder::with_seed(seed).build(6, &faces).unwrap();
        let b = DeckBuilder::with_seed(seed).build(6, &faces).unwrap();
        prop_assert_eq!(a, b);
    }
}

// =============================================================================
// Distribution Tests
// =============================================================================

#[test]
fn test_every_face_gets_chosen() {
    let faces = pool(6);
    let mut builder = DeckBuilder::with_seed(7);
    let mut chosen = FxHashMap::default();

    for _ in 0..200 {
        for face in builder.build(2, &faces).unwrap().faces() {
            *chosen.entry(face).or_insert(0usize) += 1;
        }
    }

    // 400 picks over 6 faces; each should land well away from zero.
    assert_eq!(chosen.len(), 6);
    assert!(chosen.values().all(|&n| n > 30));
}

#[test]
fn test_first_position_varies() {
    let faces = pool(3);
    let mut builder = DeckBuilder::with_seed(11);
    let mut leading = FxHashMap::default();

    for _ in 0..100 {
        let deck = builder.build(3, &faces).unwrap();
        let first = deck.iter().next().unwrap().key();
        *leading.entry(first).or_insert(0usize) += 1;
    }

    assert!(leading.len() >= 5);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_insufficient_faces() {
    let err = DeckBuilder::with_seed(1).build(5, &pool(4)).unwrap_err();
    assert_eq!(
        err,
        DeckError::InsufficientFaces {
            requested: 5,
            available: 4
        }
    );
}

#[test]
fn test_duplicate_faces_count_once() {
    let faces: Vec<FaceId> = ["cat", "cat", "dog", "dog"].into_iter().map(FaceId::from).collect();
    let err = DeckBuilder::with_seed(1).build(3, &faces).unwrap_err();
    assert_eq!(
        err,
        DeckError::InsufficientFaces {
            requested: 3,
            available: 2
        }
    );

    let deck = DeckBuilder::with_seed(1).build(2, &faces).unwrap();
    assert_eq!(deck.len(), 4);
}

#[test]
fn test_zero_pairs() {
    assert_eq!(
        DeckBuilder::with_seed(1).build(0, &pool(3)).unwrap_err(),
        DeckError::EmptyDeck
    );
}
