//! Error types
//!
//! Nothing here is fatal: callers keep their previous valid state and report.

/// Errors surfaced to the user by wheel, bingo and settings commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("Nothing to pick from: the item pool is empty")]
    EmptyPool,

    #[error("Please enter at least one game")]
    NoGames,

    #[error("Challenges are enabled but no valid challenge entries were found")]
    NoChallenges,

    #[error("Wait for the wheel to stop before changing settings")]
    SpinInProgress,

    #[error("Segment {index} out of range for a wheel of {count}")]
    InvalidSegment { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, PartyError>;
