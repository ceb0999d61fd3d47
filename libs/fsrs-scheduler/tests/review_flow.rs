//! End-to-end review flows as a caller would drive them.

mod common;

use chrono::Duration;
use fsrs_scheduler::{
    Card, Fsrs, MemoryState, Rating, ReviewOutcome, ReviewScheduler, SchedulerError, Tier,
};
use pretty_assertions::assert_eq;

use common::fixtures;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Pro card on a six-review streak, reviewed Good one day later.
#[test]
fn test_pro_card_crossing_streak_threshold() {
    let fsrs = Fsrs::default();
    let now = fixtures::review_time();
    let card = fixtures::card(0.5, 5.0, 6, Tier::Pro, 1);

    let outcome = fsrs.schedule(&card, Rating::Good, now).unwrap();

    let expected_retention = ((-1.0f64 / (0.5 * 1.2)).exp() * 1.2).min(1.0);
    assert!(approx(outcome.memory_state.retention_score, expected_retention));
    assert_eq!(outcome.memory_state.streak_count, 7);
    assert_eq!(outcome.memory_state.review_count, 6);

    // 0.5 * 1.2 with no streak bonus is below the one-day floor.
    assert_eq!(outcome.interval_days, 1.0);
    assert_eq!(outcome.next_review_at, now + Duration::days(1));
}

#[test]
fn test_streak_bonus_reads_pre_review_streak() {
    let fsrs = Fsrs::default();
    let now = fixtures::review_time();

    let before = fixtures::card(10.0, 5.0, 6, Tier::Pro, 1);
    let first = fsrs.schedule(&before, Rating::Good, now).unwrap();
    assert!(approx(first.interval_days, 12.0));

    // The returned streak of 7 only earns the bonus on the following review.
    let after = Card::new(first.memory_state, Tier::Pro);
    let later = first.next_review_at;
    let second = fsrs.schedule(&after, Rating::Good, later).unwrap();
    let expected = after.memory_state.stability * 1.2 * 1.1;
    assert!(approx(second.interval_days, expected));
}

#[test]
fn test_new_card_lifecycle_on_good() {
    let fsrs = Fsrs::default();
    let mut now = fixtures::review_time();
    let mut card = Card::new(fsrs.initial_state(now), Tier::Basic);
    let mut last_interval = 0.0;

    for review in 1..=12u32 {
        let ReviewOutcome {
            memory_state,
            next_review_at,
            interval_days,
        } = fsrs.schedule(&card, Rating::Good, now).unwrap();

        assert_eq!(memory_state.review_count, review);
        assert_eq!(memory_state.streak_count, review);
        assert_eq!(memory_state.last_reviewed_at, now);
        assert!(memory_state.stability > card.memory_state.stability);
        assert!(interval_days >= last_interval);
        assert!(next_review_at > now);

        last_interval = interval_days;
        now = next_review_at;
        card = Card::new(memory_state, Tier::Basic);
    }
}

#[test]
fn test_lapse_resets_streak_and_interval() {
    let fsrs = Fsrs::default();
    let now = fixtures::review_time();
    let card = fixtures::card(120.0, 4.0, 31, Tier::Power, 90);

    let outcome = fsrs.schedule(&card, Rating::Again, now).unwrap();
    assert_eq!(outcome.memory_state.streak_count, 0);
    assert_eq!(outcome.interval_days, 1.0);
    assert!(outcome.memory_state.stability < 120.0);
    assert!(outcome.memory_state.difficulty > 4.0);
    assert_eq!(outcome.memory_state.last_rating, Some(Rating::Again));
}

#[test]
fn test_state_survives_json_persistence() {
    let fsrs = Fsrs::default();
    let now = fixtures::review_time();
    let card = fixtures::card(3.0, 6.5, 2, Tier::Pro, 4);

    let outcome = fsrs.schedule(&card, Rating::Easy, now).unwrap();
    let stored = serde_json::to_string(&outcome.memory_state).unwrap();
    let loaded: MemoryState = serde_json::from_str(&stored).unwrap();
    assert!(approx(loaded.stability, outcome.memory_state.stability));
    assert!(approx(loaded.difficulty, outcome.memory_state.difficulty));
    assert_eq!(loaded.last_rating, Some(Rating::Easy));
    assert_eq!(loaded.last_reviewed_at, now);
    assert_eq!(loaded.streak_count, 3);

    let reloaded = Card::new(loaded, Tier::Pro);
    let later = outcome.next_review_at;
    let from_loaded = fsrs.schedule(&reloaded, Rating::Good, later).unwrap();
    let from_memory = fsrs
        .schedule(&Card::new(outcome.memory_state, Tier::Pro), Rating::Good, later)
        .unwrap();
    assert!(approx(from_loaded.memory_state.stability, from_memory.memory_state.stability));
    assert!(approx(from_loaded.interval_days, from_memory.interval_days));
    assert_eq!(from_loaded.memory_state.streak_count, 4);
}

#[test]
fn test_boundary_inputs_rejected() {
    let fsrs = Fsrs::default();
    let now = fixtures::review_time();

    assert!(matches!(Rating::try_from(0u8), Err(SchedulerError::InvalidRating(0))));
    assert!(matches!("gold".parse::<Tier>(), Err(SchedulerError::UnknownTier(_))));

    let corrupted = fixtures::card(0.0, 5.0, 0, Tier::Basic, 1);
    assert!(matches!(
        fsrs.schedule(&corrupted, Rating::Good, now),
        Err(SchedulerError::InvalidStability(_))
    ));

    let corrupted = fixtures::card(2.0, 0.5, 0, Tier::Basic, 1);
    assert!(matches!(
        fsrs.schedule(&corrupted, Rating::Good, now),
        Err(SchedulerError::InvalidDifficulty(_))
    ));
}

#[test]
fn test_review_before_last_review_counts_as_zero_elapsed() {
    let fsrs = Fsrs::default();
    let now = fixtures::review_time();
    let card = fixtures::card(4.0, 5.0, 0, Tier::Basic, -2);

    let state = fsrs.update_memory_state(&card, Rating::Good, now).unwrap();
    assert_eq!(state.retention_score, 1.0);
}

#[test]
fn test_due_after_interval_elapses() {
    let fsrs = Fsrs::default();
    let now = fixtures::review_time();
    let card = fixtures::card(20.0, 5.0, 3, Tier::Basic, 2);

    let outcome = fsrs.schedule(&card, Rating::Good, now).unwrap();
    let reviewed = Card::new(outcome.memory_state, Tier::Basic);

    assert!(!fsrs.is_due(&reviewed, now).unwrap());
    assert!(fsrs.is_due(&reviewed, outcome.next_review_at).unwrap());
}
