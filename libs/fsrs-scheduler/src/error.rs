//! Error types for fsrs-scheduler.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors returned when the scheduler is handed input it cannot work with.
///
/// Out-of-range *outputs* are clamped as part of normal operation; these
/// variants only cover bad inputs and bad parameter tables.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid rating {0}: expected 1-4")]
    InvalidRating(u8),

    #[error("invalid stability {0}: must be positive and finite")]
    InvalidStability(f64),

    #[error("invalid difficulty {0}: must be within 1.0-10.0")]
    InvalidDifficulty(f64),

    #[error("invalid elapsed days {0}: must be non-negative")]
    InvalidElapsedDays(f64),

    #[error("unknown subscription tier: {0}")]
    UnknownTier(String),

    #[error("next review instant out of range: {0} days after {1}")]
    InstantOutOfRange(f64, chrono::DateTime<chrono::Utc>),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("malformed parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}
