//! Core types for the review scheduler.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::params::DEFAULT_PARAMETERS;

/// Rating for a review.
///
/// Serialized as its numeric value so stored states stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    /// Map a pass/fail answer to the 4-point scale.
    /// Wrong -> Again, Correct -> Good
    pub fn from_pass_fail(correct: bool) -> Self {
        if correct { Self::Good } else { Self::Again }
    }

    /// Good and Easy count towards a streak.
    pub fn is_success(self) -> bool {
        self.to_value() >= 3
    }

    /// Distance from the neutral rating (Good).
    pub(crate) fn offset(self) -> f64 {
        f64::from(self.to_value()) - 3.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(SchedulerError::InvalidRating(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.to_value()
    }
}

/// Subscription tier of the card owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Basic,
    Pro,
    Power,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Pro, Tier::Power];

    /// Get the tier name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Power => "power",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "pro" => Ok(Self::Pro),
            "power" => Ok(Self::Power),
            _ => Err(SchedulerError::UnknownTier(s.to_string())),
        }
    }
}

/// What the scheduler believes about how well one item is remembered.
///
/// Only ever replaced wholesale by the scheduler's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    /// Days until recall probability decays to the reference threshold.
    pub stability: f64,
    /// Item hardness, 1.0 (easiest) to 10.0.
    pub difficulty: f64,
    pub review_count: u32,
    pub last_reviewed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_rating: Option<Rating>,
    /// Consecutive Good/Easy reviews.
    pub streak_count: u32,
    /// Retrievability right before the most recent review.
    pub retention_score: f64,
}

impl MemoryState {
    /// State for a card that has just been created and never reviewed.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            stability: DEFAULT_PARAMETERS.initial_stability,
            difficulty: DEFAULT_PARAMETERS.initial_difficulty,
            review_count: 0,
            last_reviewed_at: now,
            last_rating: None,
            streak_count: 0,
            retention_score: 1.0,
        }
    }

    pub fn is_new(&self) -> bool {
        self.review_count == 0
    }
}

/// The slice of a card the scheduler reads.
///
/// Owned by the caller; the scheduler never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub memory_state: MemoryState,
    pub tier: Tier,
}

impl Card {
    pub fn new(memory_state: MemoryState, tier: Tier) -> Self {
        Self { memory_state, tier }
    }
}
