//! Shared inputs for scheduler integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fsrs_scheduler::{Card, MemoryState, Rating, Tier};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub const RATINGS: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

/// Fixed review instant so results are reproducible.
pub fn review_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 15, 8, 30, 0).unwrap()
}

/// Card last reviewed `days_ago` days before [`review_time`].
pub fn card(stability: f64, difficulty: f64, streak_count: u32, tier: Tier, days_ago: i64) -> Card {
    Card::new(
        MemoryState {
            stability,
            difficulty,
            review_count: 5,
            last_reviewed_at: review_time() - Duration::days(days_ago),
            last_rating: Some(Rating::Good),
            streak_count,
            retention_score: 0.9,
        },
        tier,
    )
}

/// Card with stability in (0, 1000], difficulty in [1, 10] and any tier.
pub fn random_card(rng: &mut ChaCha8Rng) -> Card {
    let stability = loop {
        let s: f64 = rng.gen_range(0.0..=1000.0);
        if s > 0.0 {
            break s;
        }
    };
    let difficulty = rng.gen_range(1.0..=10.0);
    let streak_count = rng.gen_range(0..60);
    let tier = Tier::ALL[rng.gen_range(0..Tier::ALL.len())];
    let days_ago = rng.gen_range(0..400);
    card(stability, difficulty, streak_count, tier, days_ago)
}

pub fn random_rating(rng: &mut ChaCha8Rng) -> Rating {
    RATINGS[rng.gen_range(0..RATINGS.len())]
}
