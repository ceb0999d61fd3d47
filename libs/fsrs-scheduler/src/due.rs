//! Due-card detection.
//!
//! A card is due once its retrievability has decayed below the review
//! threshold. This reads memory state only; it never feeds back into
//! scheduling.

use chrono::{DateTime, Utc};

use crate::algorithm::fsrs::Fsrs;
use crate::error::Result;
use crate::types::Card;

impl Fsrs {
    /// Retrievability of `card` at `now`.
    pub fn current_retrievability(&self, card: &Card, now: DateTime<Utc>) -> Result<f64> {
        let state = &card.memory_state;
        let elapsed = Self::elapsed_days(state.last_reviewed_at, now);
        self.retrievability(state.stability, elapsed, card.tier)
    }

    /// Whether `card` has decayed below the review threshold.
    pub fn is_due(&self, card: &Card, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.current_retrievability(card, now)? < self.params.review_threshold)
    }

    /// Indices of the due cards, in input order.
    pub fn due_cards(&self, cards: &[Card], now: DateTime<Utc>) -> Result<Vec<usize>> {
        let mut due = Vec::new();
        for (index, card) in cards.iter().enumerate() {
            if self.is_due(card, now)? {
                due.push(index);
            }
        }
        tracing::debug!(total = cards.len(), due = due.len(), "filtered due cards");
        Ok(due)
    }
}
