//! Scheduler constants.
//!
//! The weight vector and modifier tables are fixed data. They are kept in a
//! serde struct so a deployment can pin them in a config file, but nothing
//! in the scheduler ever mutates them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::types::Tier;

/// Interval multipliers applied per subscription tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierModifiers {
    pub basic: f64,
    pub pro: f64,
    pub power: f64,
}

/// Interval multiplier unlocked once a streak reaches `min_streak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakBonus {
    pub min_streak: u32,
    pub multiplier: f64,
}

/// Full constants table used by [`crate::algorithm::fsrs::Fsrs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Weights shared by the difficulty and stability formulas.
    pub w: [f64; 13],
    pub initial_stability: f64,
    pub initial_difficulty: f64,
    /// Floor applied to every computed stability.
    pub minimum_stability: f64,
    pub minimum_difficulty: f64,
    pub maximum_difficulty: f64,
    /// Shrinks stability growth on Again and the interval on Hard.
    pub hard_penalty: f64,
    /// Boosts stability growth and the interval on Easy.
    pub easy_bonus: f64,
    /// Retrievability below which a card is due.
    pub review_threshold: f64,
    /// Days, before tier scaling.
    pub maximum_interval: f64,
    /// Days.
    pub minimum_interval: f64,
    pub tier_modifiers: TierModifiers,
    pub streak_bonuses: [StreakBonus; 3],
}

/// Longest tier-scaled interval a table may allow, in days.
pub const MAX_SCHEDULABLE_DAYS: f64 = 100_000.0;

pub const DEFAULT_PARAMETERS: Parameters = Parameters {
    w: [
        1.0, 1.0, // w[0-1]: difficulty rating weight, mean reversion weight
        5.0,  // w[2]: stability growth scale
        -0.5, // w[3]: difficulty damping (exponent per difficulty point)
        -0.5, // w[4]: rating weight, stored negative
        0.2,  // w[5]: stability multiplier weight
        1.4, -0.12, 0.8, 2.0, -0.2, 0.2, 1.0, // w[6-12]: unused by the update law
    ],
    initial_stability: 0.5,
    initial_difficulty: 5.0,
    minimum_stability: 0.01,
    minimum_difficulty: 1.0,
    maximum_difficulty: 10.0,
    hard_penalty: 0.5,
    easy_bonus: 1.3,
    review_threshold: 0.85,
    maximum_interval: 365.0,
    minimum_interval: 1.0,
    tier_modifiers: TierModifiers {
        basic: 1.0,
        pro: 1.2,
        power: 1.5,
    },
    streak_bonuses: [
        StreakBonus { min_streak: 7, multiplier: 1.1 },
        StreakBonus { min_streak: 14, multiplier: 1.2 },
        StreakBonus { min_streak: 30, multiplier: 1.3 },
    ],
};

impl Default for Parameters {
    fn default() -> Self {
        DEFAULT_PARAMETERS
    }
}

impl Parameters {
    /// Load a parameter table from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Modifier for a tier.
    pub fn tier_modifier(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Basic => self.tier_modifiers.basic,
            Tier::Pro => self.tier_modifiers.pro,
            Tier::Power => self.tier_modifiers.power,
        }
    }

    /// Multiplier for the highest streak threshold met, or 1.0.
    pub fn streak_bonus(&self, streak: u32) -> f64 {
        self.streak_bonuses
            .iter()
            .filter(|bonus| streak >= bonus.min_streak)
            .max_by_key(|bonus| bonus.min_streak)
            .map_or(1.0, |bonus| bonus.multiplier)
    }

    /// Longest interval a tier may be scheduled, in days.
    pub fn max_interval_for(&self, tier: Tier) -> f64 {
        self.maximum_interval * self.tier_modifier(tier)
    }

    /// Check that the table keeps the scheduler's output invariants intact.
    pub fn validate(&self) -> Result<()> {
        if let Some(weight) = self.w.iter().find(|w| !w.is_finite()) {
            return Err(invalid(format!("weight {weight} is not finite")));
        }

        for tier in Tier::ALL {
            let modifier = self.tier_modifier(tier);
            if !(modifier.is_finite() && modifier > 0.0) {
                return Err(invalid(format!(
                    "tier modifier for {tier} must be positive, got {modifier}"
                )));
            }
        }

        ensure_positive("hard_penalty", self.hard_penalty)?;
        ensure_positive("easy_bonus", self.easy_bonus)?;
        ensure_positive("minimum_stability", self.minimum_stability)?;
        ensure_positive("minimum_interval", self.minimum_interval)?;

        if self.initial_stability < self.minimum_stability || !self.initial_stability.is_finite() {
            return Err(invalid(format!(
                "initial_stability {} is below minimum_stability {}",
                self.initial_stability, self.minimum_stability
            )));
        }

        if !(self.minimum_difficulty >= 1.0 && self.minimum_difficulty < self.maximum_difficulty) {
            return Err(invalid(format!(
                "difficulty bounds [{}, {}] are not a valid range",
                self.minimum_difficulty, self.maximum_difficulty
            )));
        }

        if !(self.minimum_difficulty..=self.maximum_difficulty).contains(&self.initial_difficulty) {
            return Err(invalid(format!(
                "initial_difficulty {} is outside [{}, {}]",
                self.initial_difficulty, self.minimum_difficulty, self.maximum_difficulty
            )));
        }

        if !(self.review_threshold > 0.0 && self.review_threshold < 1.0) {
            return Err(invalid(format!(
                "review_threshold must be within (0, 1), got {}",
                self.review_threshold
            )));
        }

        if !(self.maximum_interval.is_finite() && self.maximum_interval >= self.minimum_interval) {
            return Err(invalid(format!(
                "maximum_interval {} is below minimum_interval {}",
                self.maximum_interval, self.minimum_interval
            )));
        }

        for tier in Tier::ALL {
            let longest = self.max_interval_for(tier);
            if !(self.minimum_interval..=MAX_SCHEDULABLE_DAYS).contains(&longest) {
                return Err(invalid(format!(
                    "maximum interval for {tier} is {longest} days, expected {}-{}",
                    self.minimum_interval, MAX_SCHEDULABLE_DAYS
                )));
            }
        }

        if let Some(bonus) = self
            .streak_bonuses
            .iter()
            .find(|bonus| !(bonus.multiplier.is_finite() && bonus.multiplier >= 1.0))
        {
            return Err(invalid(format!(
                "streak bonus for {} must be at least 1.0, got {}",
                bonus.min_streak, bonus.multiplier
            )));
        }

        Ok(())
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

fn invalid(message: String) -> SchedulerError {
    SchedulerError::InvalidParameters(message)
}
