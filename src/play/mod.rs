//! Playing complete games and matches.
//!
//! - `Arena`: drives episodes with one `ActionSelector` per color
//! - `GameRecord` / `TurnRecord`: what happened in a game
//! - `MatchSummary`: win counts over many games

pub mod arena;
pub mod record;

pub use arena::{Arena, MatchConfig};
pub use record::{GameRecord, MatchSummary, TurnRecord};
