//! # gammon-env
//!
//! Backgammon as a resettable, step-based episode, plus a greedy move
//! selector driven by a win-probability scorer.
//!
//! ## Design Principles
//!
//! 1. **Engine-Agnostic**: Board layout, move legality and feature encoding
//!    live behind the `GameEngine` trait. This crate only sequences turns.
//!
//! 2. **Two Colors, Explicit Turns**: `step` plays for the current color and
//!    never advances the turn. Drivers call `next_opponent` themselves.
//!
//! 3. **Errors, Not Asserts**: Bad colors, malformed rolls and engine
//!    rejections surface as `GammonError`.
//!
//! ## Modules
//!
//! - `core`: Colors, moves, actions, observations, dice, configuration, errors
//! - `rules`: `GameEngine` trait and game results
//! - `env`: The `Episode` state machine
//! - `policy`: Win-probability scorers and the `ActionSelector`
//! - `play`: Full games and matches between two selectors

pub mod core;
pub mod env;
pub mod play;
pub mod policy;
pub mod rules;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, Color, ColorMap, ColorMapper, DiscreteSpace, EngineError, EpisodeConfig, GameRng,
    GameRngState, GammonError, Move, MoveRejection, Observation, ObservationSpace, PlayerId,
    Result, Roll, ACTION_SPACE_SIZE, DEFAULT_MAX_ROUNDS, MAX_MOVES, OBSERVATION_LEN,
};

pub use crate::env::{Episode, EpisodePhase, EpisodeState, ResetInfo, StepInfo, StepOutcome};

pub use crate::rules::{GameEngine, GameResult, WinKind};

pub use crate::policy::{
    lookahead_features, player_score, select_best, select_scored, ActionSelector, ConstantScore,
    Selection, WinProbability,
};

pub use crate::play::{Arena, GameRecord, MatchConfig, MatchSummary, TurnRecord};
