//! Review scheduling.

pub mod fsrs;

use crate::error::Result;
use crate::types::{Card, MemoryState, Rating};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of scheduling a card after review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub memory_state: MemoryState,
    pub next_review_at: DateTime<Utc>,
    pub interval_days: f64,
}

/// Trait for spaced repetition schedulers.
pub trait ReviewScheduler: Send + Sync {
    /// Scheduler identifier.
    fn name(&self) -> &'static str;

    /// Memory state for a card created at `now`.
    fn initial_state(&self, now: DateTime<Utc>) -> MemoryState;

    /// Compute the new memory state and next review instant after a review.
    ///
    /// Both halves are derived from the card as it was before this review.
    fn schedule(&self, card: &Card, rating: Rating, now: DateTime<Utc>) -> Result<ReviewOutcome>;
}
