//! Core types: colors, moves and actions, observations, dice, configuration, errors.
//!
//! Everything here is engine-agnostic. Board semantics belong to the
//! `GameEngine` implementation.

pub mod action;
pub mod color;
pub mod config;
pub mod error;
pub mod observation;
pub mod rng;

pub use action::{Action, Move, Roll, MAX_MOVES};
pub use color::{Color, ColorMap, ColorMapper, PlayerId};
pub use config::{EpisodeConfig, DEFAULT_MAX_ROUNDS};
pub use error::{EngineError, GammonError, MoveRejection, Result};
pub use observation::{
    DiscreteSpace, Observation, ObservationSpace, ACTION_SPACE_SIZE, OBSERVATION_LEN,
};
pub use rng::{opening_roll_with, GameRng, GameRngState};
