//! FSRS (Free Spaced Repetition Scheduler) with subscription tiers.
//!
//! Tracks a DSR-style memory model per card:
//! - Difficulty (D): item hardness 1-10
//! - Stability (S): days until recall drops to the reference threshold
//! - Retrievability (R): probability of recall right now
//!
//! Tier modifiers stretch the forgetting curve and the scheduled interval,
//! and long success streaks earn an interval bonus.

use super::{ReviewOutcome, ReviewScheduler};
use crate::error::{Result, SchedulerError};
use crate::params::{Parameters, DEFAULT_PARAMETERS};
use crate::types::{Card, MemoryState, Rating, Tier};
use chrono::{DateTime, Duration, Utc};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Interval forced by an Again rating, in days.
const RELEARN_INTERVAL_DAYS: f64 = 1.0;

/// FSRS scheduler over a fixed constants table.
#[derive(Debug, Clone)]
pub struct Fsrs {
    pub params: Parameters,
}

impl Default for Fsrs {
    fn default() -> Self {
        Self {
            params: DEFAULT_PARAMETERS,
        }
    }
}

impl ReviewScheduler for Fsrs {
    fn name(&self) -> &'static str {
        "fsrs"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> MemoryState {
        MemoryState {
            stability: self.params.initial_stability,
            difficulty: self.params.initial_difficulty,
            ..MemoryState::new(now)
        }
    }

    fn schedule(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> Result<ReviewOutcome> {
        let memory_state = self.update_memory_state(card, rating, now)?;
        let interval_days = self.interval_days(card, rating)?;
        let next_review_at = offset_by_days(now, interval_days)?;

        Ok(ReviewOutcome {
            memory_state,
            next_review_at,
            interval_days,
        })
    }
}

impl Fsrs {
    /// Build a scheduler over a custom table, rejecting tables that would
    /// break the output bounds.
    pub fn with_parameters(params: Parameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Probability the item is still recalled after `elapsed_days`.
    /// R = min(e^(-t / (S * m)) * m, 1) where m is the tier modifier
    pub fn retrievability(&self, stability: f64, elapsed_days: f64, tier: Tier) -> Result<f64> {
        if !(stability.is_finite() && stability > 0.0) {
            return Err(SchedulerError::InvalidStability(stability));
        }
        if elapsed_days.is_nan() || elapsed_days < 0.0 {
            return Err(SchedulerError::InvalidElapsedDays(elapsed_days));
        }

        let modifier = self.params.tier_modifier(tier);
        // A stretched stability near f64::MAX must not become inf, or inf / inf is NaN.
        let scale = (stability * modifier).min(f64::MAX);
        let base = (-elapsed_days / scale).exp();
        Ok((base * modifier).clamp(0.0, 1.0))
    }

    /// Fractional days from `since` to `now`, zero if `now` is earlier.
    pub fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = now.signed_duration_since(since).num_milliseconds();
        if elapsed_ms < 0 {
            tracing::warn!(
                %since,
                %now,
                "review instant precedes last review, treating elapsed time as zero"
            );
            return 0.0;
        }
        elapsed_ms as f64 / MS_PER_DAY
    }

    /// Calculate the memory state after reviewing `card` with `rating` at `now`.
    pub fn update_memory_state(
        &self,
        card: &Card,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<MemoryState> {
        let state = &card.memory_state;
        self.validate_state(state)?;

        let modifier = self.params.tier_modifier(card.tier);

        let difficulty = self.next_difficulty(state.difficulty, rating, modifier);
        let stability = self.next_stability(state.stability, state.difficulty, rating);
        let streak_count = if rating.is_success() {
            state.streak_count.saturating_add(1)
        } else {
            0
        };

        let elapsed = Self::elapsed_days(state.last_reviewed_at, now);
        let retention_score = self.retrievability(state.stability, elapsed, card.tier)?;

        tracing::debug!(
            tier = %card.tier,
            rating = rating.to_value(),
            elapsed_days = elapsed,
            stability_before = state.stability,
            stability_after = stability,
            difficulty_before = state.difficulty,
            difficulty_after = difficulty,
            streak_count,
            retention_score,
            "updated memory state"
        );

        Ok(MemoryState {
            stability,
            difficulty,
            review_count: state.review_count.saturating_add(1),
            last_reviewed_at: now,
            last_rating: Some(rating),
            streak_count,
            retention_score,
        })
    }

    /// Days until the next review of `card` after a review rated `rating`.
    ///
    /// Uses the card's state from before the review, including its streak.
    pub fn interval_days(&self, card: &Card, rating: Rating) -> Result<f64> {
        let state = &card.memory_state;
        self.validate_state(state)?;

        let base = state.stability * self.params.tier_modifier(card.tier);
        let with_streak = base * self.params.streak_bonus(state.streak_count);

        let adjusted = match rating {
            Rating::Again => RELEARN_INTERVAL_DAYS,
            Rating::Hard => with_streak * self.params.hard_penalty,
            Rating::Good => with_streak,
            Rating::Easy => with_streak * self.params.easy_bonus,
        };

        let interval = adjusted.clamp(
            self.params.minimum_interval,
            self.params.max_interval_for(card.tier),
        );

        tracing::debug!(
            tier = %card.tier,
            rating = rating.to_value(),
            streak_count = state.streak_count,
            interval_days = interval,
            "computed review interval"
        );

        Ok(interval)
    }

    /// Instant at which `card` should next be reviewed.
    pub fn next_review_instant(
        &self,
        card: &Card,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let interval = self.interval_days(card, rating)?;
        offset_by_days(now, interval)
    }

    /// D' = clamp(D + (w[0] * (3 - G) + w[1] * (D0 - D)) * m, 1, 10)
    fn next_difficulty(&self, difficulty: f64, rating: Rating, modifier: f64) -> f64 {
        let w = &self.params.w;
        let delta = w[0] * -rating.offset() + w[1] * (self.params.initial_difficulty - difficulty);
        (difficulty + delta * modifier).clamp(
            self.params.minimum_difficulty,
            self.params.maximum_difficulty,
        )
    }

    /// S' = S * (1 + w[2] * e^(w[3] * D) * (-w[4] * (G - 3) + w[5] * k))
    /// where k is the hard penalty on Again, the easy bonus on Easy, else 1.
    fn next_stability(&self, stability: f64, difficulty: f64, rating: Rating) -> f64 {
        let w = &self.params.w;
        let multiplier = match rating {
            Rating::Again => self.params.hard_penalty,
            Rating::Easy => self.params.easy_bonus,
            Rating::Hard | Rating::Good => 1.0,
        };

        let damping = (w[3] * difficulty).exp();
        let drive = -w[4] * rating.offset() + w[5] * multiplier;
        let growth = 1.0 + w[2] * damping * drive;

        // Upper bound keeps the value finite so the next review accepts it.
        (stability * growth).clamp(self.params.minimum_stability, f64::MAX)
    }

    /// Reject stored state that could only come from a corrupted record.
    fn validate_state(&self, state: &MemoryState) -> Result<()> {
        if !(state.stability.is_finite() && state.stability > 0.0) {
            tracing::warn!(stability = state.stability, "rejecting memory state");
            return Err(SchedulerError::InvalidStability(state.stability));
        }
        let bounds = self.params.minimum_difficulty..=self.params.maximum_difficulty;
        if !bounds.contains(&state.difficulty) {
            tracing::warn!(difficulty = state.difficulty, "rejecting memory state");
            return Err(SchedulerError::InvalidDifficulty(state.difficulty));
        }
        Ok(())
    }
}

/// `now` plus a fractional number of days.
///
/// UTC days are a fixed 86 400 s, so a millisecond duration is exact enough.
fn offset_by_days(now: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>> {
    let ms = (days * MS_PER_DAY).round();
    if !(ms.is_finite() && ms.abs() < i64::MAX as f64) {
        return Err(SchedulerError::InstantOutOfRange(days, now));
    }
    Duration::try_milliseconds(ms as i64)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or(SchedulerError::InstantOutOfRange(days, now))
}
