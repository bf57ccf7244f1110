//! Game engine contract.
//!
//! Engines implement `GameEngine` to provide:
//! - The starting board and move application
//! - Legal actions for a roll
//! - Player-relative feature encoding
//! - Win detection
//!
//! Episodes call into `GameEngine` but never interpret the board directly.

pub mod engine;

pub use engine::{GameEngine, GameResult, WinKind};
