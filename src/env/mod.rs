//! Episode state machine over a `GameEngine`.

pub mod episode;

pub use episode::{Episode, EpisodePhase, EpisodeState, ResetInfo, StepInfo, StepOutcome};
