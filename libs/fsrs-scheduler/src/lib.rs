//! Review scheduler for spaced repetition cards.
//!
//! Provides:
//! - FSRS memory-state updates with subscription-tier modifiers
//! - Next-review interval calculation with streak bonuses
//! - Due-card detection against the retention threshold
//! - Shared types (MemoryState, Card, Rating, Tier)
//!
//! Everything here is pure computation over caller-owned values; persisting
//! the returned state is up to the caller.

pub mod algorithm;
pub mod due;
pub mod error;
pub mod params;
pub mod types;

pub use algorithm::fsrs::Fsrs;
pub use algorithm::{ReviewOutcome, ReviewScheduler};
pub use error::{Result, SchedulerError};
pub use params::{
    Parameters, StreakBonus, TierModifiers, DEFAULT_PARAMETERS, MAX_SCHEDULABLE_DAYS,
};
pub use types::{Card, MemoryState, Rating, Tier};
