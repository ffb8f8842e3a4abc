//! Score reporter tests.

use chrono::{TimeZone, Utc};
use memotest::core::{Difficulty, ScoreError};
use memotest::scores::{
    InMemoryPersistence, OwnerId, PersistenceService, ScoreReporter, DEFAULT_LIMIT,
    SCORES_COLLECTION,
};
use proptest::prelude::*;

fn reporter() -> ScoreReporter<InMemoryPersistence> {
    ScoreReporter::new(InMemoryPersistence::new())
}

// =============================================================================
// Top Scores Tests
// =============================================================================

#[test]
fn test_top_scores_filtered_and_sorted() {
    let reporter = reporter();
    let owner = OwnerId::new("a");
    for (difficulty, seconds) in [
        (Difficulty::Easy, 40.0),
        (Difficulty::Hard, 5.0),
        (Difficulty::Easy, 12.5),
        (Difficulty::Medium, 1.0),
        (Difficulty::Easy, 30.25),
        (Difficulty::Easy, 99.0),
        (Difficulty::Easy, 7.0),
        (Difficulty::Easy, 55.0),
        (Difficulty::Easy, 8.0),
    ] {
        reporter.record_score(&owner, difficulty, seconds).unwrap();
    }

    let top = reporter.top_scores(Difficulty::Easy, DEFAULT_LIMIT).unwrap();
    let seconds: Vec<f64> = top.iter().map(|r| r.seconds).collect();
    assert_eq!(seconds, vec![7.0, 8.0, 12.5, 30.25, 40.0]);
    assert!(top.iter().all(|r| r.difficulty == Difficulty::Easy));

    assert_eq!(reporter.top_scores(Difficulty::Hard, 5).unwrap().len(), 1);
    assert!(reporter.top_scores(Difficulty::Medium, 0).unwrap().is_empty());
}

#[test]
fn test_ties_keep_recording_order() {
    let reporter = reporter();
    for name in ["first", "second", "third"] {
        reporter
            .record_score(&OwnerId::new(name), Difficulty::Medium, 20.0)
            .unwrap();
    }
    reporter
        .record_score(&OwnerId::new("fast"), Difficulty::Medium, 19.0)
        .unwrap();

    let owners: Vec<String> = reporter
        .top_scores(Difficulty::Medium, 5)
        .unwrap()
        .into_iter()
        .map(|r| r.owner_id.0)
        .collect();
    assert_eq!(owners, vec!["fast", "first", "second", "third"]);
}

#[test]
fn test_empty_board() {
    let reporter = reporter();
    assert!(reporter.top_scores(Difficulty::Easy, 5).unwrap().is_empty());
    assert!(reporter
        .leaderboard(Difficulty::Easy, 5, None)
        .unwrap()
        .is_empty());
}

proptest! {
    #[test]
    fn test_top_scores_bounded(
        entries in prop::collection::vec((0u8..3, 0.0f64..10_000.0), 0..40),
        limit in 0usize..10,
    ) {
        let reporter = reporter();
        let owner = OwnerId::new("p");
        for (d, seconds) in &entries {
            reporter.record_score(&owner, Difficulty::ALL[*d as usize], *seconds).unwrap();
        }

        for difficulty in Difficulty::ALL {
            let top = reporter.top_scores(difficulty, limit).unwrap();
            let available = entries
                .iter()
                .filter(|(d, _)| Difficulty::ALL[*d as usize] == difficulty)
                .count();

            prop_assert_eq!(top.len(), available.min(limit));
            prop_assert!(top.iter().all(|r| r.difficulty == difficulty));
            prop_assert!(top.windows(2).all(|w| w[0].seconds <= w[1].seconds));
        }
    }
}

// =============================================================================
// Recording Tests
// =============================================================================

#[test]
fn test_record_fields() {
    let reporter = reporter();
    let at = Utc.with_ymd_and_hms(2023, 11, 2, 9, 30, 0).unwrap();
    let record = reporter
        .record_score_at(&OwnerId::new("u-1"), Difficulty::Hard, 64.75, at)
        .unwrap();

    assert_eq!(record.recorded_at, at);
    assert_eq!(record.owner_id.as_str(), "u-1");

    let stored = reporter
        .store()
        .query(SCORES_COLLECTION, "seconds")
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["difficulty"], "hard");
    assert_eq!(stored[0]["seconds"], 64.75);
}

#[test]
fn test_invalid_score_rejected() {
    let reporter = reporter();
    let err = reporter
        .record_score(&OwnerId::new("u"), Difficulty::Easy, -0.5)
        .unwrap_err();
    assert!(matches!(err, ScoreError::InvalidScore(s) if s == -0.5));
    assert!(err.to_string().contains("-0.5"));
    assert_eq!(reporter.store().len(SCORES_COLLECTION).unwrap(), 0);
}

#[test]
fn test_corrupt_document_only_fails_its_difficulty() {
    let reporter = reporter();
    reporter
        .record_score(&OwnerId::new("ok"), Difficulty::Hard, 12.0)
        .unwrap();

    // Tagged easy but missing the owner and date.
    let mut doc = memotest::scores::Document::new();
    doc.insert("seconds".into(), 3.into());
    doc.insert("difficulty".into(), "easy".into());
    reporter.store().append(SCORES_COLLECTION, doc).unwrap();

    let err = reporter.top_scores(Difficulty::Easy, 5).unwrap_err();
    assert!(matches!(err, ScoreError::Decode(_)));

    let hard = reporter.top_scores(Difficulty::Hard, 5).unwrap();
    assert_eq!(hard.len(), 1);
    assert!(reporter.top_scores(Difficulty::Medium, 5).unwrap().is_empty());
}

#[test]
fn test_unknown_difficulty_tag_skipped() {
    let reporter = reporter();
    let mut doc = memotest::scores::Document::new();
    doc.insert("seconds".into(), 3.into());
    doc.insert("difficulty".into(), "impossible".into());
    reporter.store().append(SCORES_COLLECTION, doc).unwrap();
    reporter
        .record_score(&OwnerId::new("ok"), Difficulty::Easy, 4.0)
        .unwrap();

    let easy = reporter.top_scores(Difficulty::Easy, 5).unwrap();
    assert_eq!(easy.len(), 1);
    assert_eq!(easy[0].seconds, 4.0);
}

// =============================================================================
// Leaderboard Tests
// =============================================================================

#[test]
fn test_leaderboard_positions() {
    let reporter = reporter();
    let viewer = OwnerId::new("viewer");
    for (owner, seconds) in [("x", 9.0), ("viewer", 4.0), ("y", 6.0), ("viewer", 11.0)] {
        reporter
            .record_score(&OwnerId::new(owner), Difficulty::Easy, seconds)
            .unwrap();
    }

    let board = reporter.leaderboard(Difficulty::Easy, 3, Some(&viewer)).unwrap();
    let rows: Vec<(usize, &str, bool)> = board
        .iter()
        .map(|r| (r.position, r.record.owner_id.as_str(), r.is_viewer))
        .collect();
    assert_eq!(rows, vec![(1, "viewer", true), (2, "y", false), (3, "x", false)]);
}
