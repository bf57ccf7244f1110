//! Error types for episodes, engines and action selection.
//!
//! Every failure here is a caller precondition violation or an engine defect.
//! None of them are transient, so nothing in this crate retries.

use thiserror::Error;

use super::action::Move;
use super::color::Color;

/// Why the engine refused a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// Destination equals origin.
    MoveToOrigin,
    /// No checker on the origin point.
    EmptyOrigin,
    /// Origin holds an opponent checker.
    OpponentChecker,
    /// A checker on the bar must enter first.
    BarMoveNeeded,
    /// Destination is held by two or more opposing checkers.
    Blocked,
    /// Destination lies outside the board.
    OutOfRange,
    /// Bearing off is not allowed yet.
    CannotBearOff,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MoveRejection::MoveToOrigin => "move to origin",
            MoveRejection::EmptyOrigin => "move empty",
            MoveRejection::OpponentChecker => "move opponent checker",
            MoveRejection::BarMoveNeeded => "move bar needed",
            MoveRejection::Blocked => "move blocked",
            MoveRejection::OutOfRange => "move out of range",
            MoveRejection::CannotBearOff => "move cannot bear off",
        };
        f.write_str(text)
    }
}

/// Failures reported by a [`GameEngine`](crate::rules::GameEngine).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: MoveRejection },
    #[error("engine backend failed: {0}")]
    Backend(String),
}

/// Errors surfaced by episodes and the action selector.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GammonError {
    #[error("invalid color {0}: expected WHITE or BLACK")]
    InvalidColor(Color),
    #[error("invalid player id {id} (external mode: {external})")]
    InvalidPlayerId { id: u8, external: bool },
    #[error("malformed roll ({first}, {second}): dice must be within 1..=6")]
    MalformedRoll { first: i8, second: i8 },
    #[error("action has {0} moves, at most 4 are allowed")]
    ActionTooLong(usize),
    #[error("episode has not been reset")]
    NotReset,
    #[error("episode is terminated, reset before stepping")]
    EpisodeTerminated,
    #[error("observation has {actual} values, expected {expected}")]
    ObservationShape { expected: usize, actual: usize },
    #[error("observation[{index}] = {value} outside [{low}, {high}]")]
    ObservationOutOfBounds {
        index: usize,
        value: f64,
        low: f64,
        high: f64,
    },
    #[error("scorer returned {actual} scores for {expected} candidates")]
    ScoreCountMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GammonError>;
